/// A directory entry. A contact may exist without a reachable phone number.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContactRecord {
    name: String,
    phone_number: Option<String>,
}

impl ContactRecord {
    pub fn new(name: &str, phone_number: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            phone_number: phone_number.map(str::to_string),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }
}
