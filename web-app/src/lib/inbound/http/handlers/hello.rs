/// Plain liveness page.
pub async fn hello() -> &'static str {
    "Hello, World!"
}
