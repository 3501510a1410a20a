use super::error::QuoteError;
use super::parser::FormData;

/// Shown in the email for optional values that were not submitted.
pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteSubmission {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub address_number: String,
    pub postal_code: String,
    pub pool_size: String,
    pub pool_age: String,
    pub services: Vec<String>,
}

impl QuoteSubmission {
    /// Read and validate the text fields of a quote form.
    pub fn from_form(form: &FormData) -> Result<Self, QuoteError> {
        let full_name = trimmed(form, "fullName");
        let phone = trimmed(form, "phone");
        let address = trimmed(form, "address");
        let address_number = trimmed(form, "address_number");
        let postal_code = trimmed(form, "postal_code");

        let required = [&full_name, &phone, &address, &address_number, &postal_code];
        if required.iter().any(|v| v.is_empty()) {
            return Err(QuoteError::MissingFields);
        }

        Ok(Self {
            full_name,
            phone,
            address,
            address_number,
            postal_code,
            pool_size: or_placeholder(trimmed(form, "poolSize")),
            pool_age: or_placeholder(trimmed(form, "poolAge")),
            services: form
                .get_all("services")
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
    }

    pub fn services_display(&self) -> String {
        if self.services.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            self.services.join(", ")
        }
    }
}

fn trimmed(form: &FormData, name: &str) -> String {
    form.get(name).unwrap_or_default().trim().to_string()
}

fn or_placeholder(value: String) -> String {
    if value.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value
    }
}
