use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Clone, Debug, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_has_content"))]
pub struct SendMessageRequest {
    #[validate(length(max = 2000))]
    pub text: Option<String>,
    /// Inline image data, usually a `data:image/...;base64,` URI.
    pub image: Option<String>,
}

impl SendMessageRequest {
    /// Text with blank input treated as absent.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|i| !i.trim().is_empty())
    }
}

fn validate_has_content(request: &SendMessageRequest) -> Result<(), ValidationError> {
    if request.text().is_none() && request.image().is_none() {
        let mut error = ValidationError::new("empty_message");
        error.message = Some("A message needs text or an image".into());
        return Err(error);
    }
    Ok(())
}
