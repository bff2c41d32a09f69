/// Opaque handle to the uploaded portrait. The core never dereferences it,
/// it only forwards it to the email template.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PortraitUrl(String);

impl PortraitUrl {
    pub fn parse(url: String) -> Result<PortraitUrl, String> {
        if url.trim().is_empty() {
            return Err(String::from("portrait reference cannot be empty"));
        }

        Ok(Self(url))
    }
}

impl AsRef<str> for PortraitUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
