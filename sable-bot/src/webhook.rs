use tracing::warn;

/// Discord caps message content at 2000 characters.
const MAX_CONTENT_LEN: usize = 1900;

/// Mirror an unexpected error to the configured error webhook. Best-effort;
/// a dead webhook must never take the error hook down with it.
pub async fn mirror_error(webhook_url: Option<&str>, content: &str) {
    let Some(webhook_url) = webhook_url else {
        return;
    };

    let mut content = content.to_owned();
    if content.len() > MAX_CONTENT_LEN {
        let mut cut = MAX_CONTENT_LEN;
        while !content.is_char_boundary(cut) {
            cut -= 1;
        }
        content.truncate(cut);
        content.push_str("…");
    }

    let payload = serde_json::json!({
        "username": "Sable",
        "content": content,
    });

    let result = reqwest::Client::new()
        .post(webhook_url)
        .json(&payload)
        .send()
        .await;

    match result {
        Ok(response) if !response.status().is_success() => {
            warn!(status = %response.status(), "error webhook rejected the report");
        }
        Err(source) => {
            warn!(?source, "failed to reach the error webhook");
        }
        Ok(_) => {}
    }
}
