use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use super::handlers::ApiError;

/// Named values handed to a template.
pub type Context = Map<String, Value>;

#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("Template {template} could not be rendered: {reason}")]
    Failed { template: String, reason: String },
}

/// Output of a renderer: a body and its media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub content_type: &'static str,
    pub body: String,
}

/// Rendering collaborator.
///
/// Handlers only ever supply a template name and values; markup is the
/// renderer's business.
pub trait Renderer: Send + Sync + 'static {
    fn render(&self, template: &str, context: &Context) -> Result<Rendered, RenderError>;
}

/// Renders a page as a JSON document `{"template": ..., "context": {...}}`.
///
/// Stands in for an HTML template engine and keeps every value a page would
/// receive observable to clients and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, template: &str, context: &Context) -> Result<Rendered, RenderError> {
        #[derive(Serialize)]
        struct Document<'a> {
            template: &'a str,
            context: &'a Context,
        }

        serde_json::to_string(&Document { template, context })
            .map(|body| Rendered {
                content_type: "application/json",
                body,
            })
            .map_err(|e| RenderError::Failed {
                template: template.to_string(),
                reason: e.to_string(),
            })
    }
}

/// A page about to be rendered.
#[derive(Debug, Clone)]
pub struct Page {
    template: &'static str,
    status: StatusCode,
    context: Context,
    messages: Vec<String>,
}

impl Page {
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            status: StatusCode::OK,
            context: Context::new(),
            messages: Vec::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.context.insert(key.to_string(), value.into());
        self
    }

    /// Attach a message for the user to this rendering.
    pub fn flash(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn render(mut self, renderer: &dyn Renderer) -> Result<Response, ApiError> {
        let messages = std::mem::take(&mut self.messages);
        self.context.insert("messages".to_string(), messages.into());

        let rendered = renderer
            .render(self.template, &self.context)
            .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

        Ok((
            self.status,
            [(CONTENT_TYPE, rendered.content_type)],
            rendered.body,
        )
            .into_response())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_json_renderer_wraps_template_and_context() {
        let mut context = Context::new();
        context.insert("user".to_string(), Value::Null);

        let rendered = JsonRenderer.render("auth/login", &context).unwrap();
        let document: Value = serde_json::from_str(&rendered.body).unwrap();

        assert_eq!(rendered.content_type, "application/json");
        assert_eq!(document, json!({"template": "auth/login", "context": {"user": null}}));
    }

    #[test]
    fn test_page_always_carries_messages() {
        let response = Page::new("index").render(&JsonRenderer).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_page_status_and_flash() {
        let page = Page::new("auth/register")
            .flash("Username is required.")
            .status(StatusCode::UNPROCESSABLE_ENTITY);

        assert_eq!(page.messages, vec!["Username is required.".to_string()]);

        let response = page.render(&JsonRenderer).unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
