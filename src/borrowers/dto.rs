use serde::{Deserialize, Serialize};

// BorrowerDto is a data transfer object for Lending service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BorrowerDto {
    #[serde(default)]
    pub borrower_id: i64,
    pub email: String,
    pub name: String,
}

impl BorrowerDto {
    pub fn new(email: &str, name: &str) -> BorrowerDto {
        BorrowerDto {
            borrower_id: 0,
            email: email.to_string(),
            name: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::borrowers::dto::BorrowerDto;

    #[tokio::test]
    async fn test_should_build_borrower() {
        let borrower = BorrowerDto::new("a@b.com", "A");
        assert_eq!(0, borrower.borrower_id);
        assert_eq!("a@b.com", borrower.email.as_str());
    }

    #[tokio::test]
    async fn test_should_parse_request_without_id() {
        let borrower: BorrowerDto = serde_json::from_str(r#"{"email":"a@b.com","name":"A"}"#).expect("should parse");
        assert_eq!(BorrowerDto::new("a@b.com", "A"), borrower);
    }
}
