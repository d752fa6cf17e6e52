use serde_json::Value;

use crate::{
    models::Preferences,
    services::providers::{ChatPrompt, TextGenerator},
};

const SYSTEM_PROMPT: &str = "You are a game preference parser. \
Return ONLY valid JSON with the keys: preferred_genres, style_tags, avoid_tags.";

const TEMPERATURE: f32 = 0.1;

/// Infers structured preferences from a free-text prompt
///
/// Never fails: a transport error or a reply that is not a JSON object
/// yields empty preferences. A blank prompt skips the external call.
pub async fn extract_preferences(generator: &dyn TextGenerator, prompt: &str) -> Preferences {
    if prompt.trim().is_empty() {
        return Preferences::default();
    }

    let request = ChatPrompt::new(SYSTEM_PROMPT, prompt, TEMPERATURE);

    let raw = match generator.generate(&request).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(
                provider = generator.name(),
                error = %e,
                "Preference extraction failed, using empty preferences"
            );
            return Preferences::default();
        }
    };

    match parse_preferences(&raw) {
        Some(prefs) => prefs,
        None => {
            tracing::warn!(
                reply_chars = raw.len(),
                "Preference reply was not a JSON object, using empty preferences"
            );
            Preferences::default()
        }
    }
}

/// Parses a model reply into preferences
///
/// Chat models often wrap JSON in prose or code fences, so the first
/// complete JSON value starting at the first `{` is read and anything after
/// it is ignored. Each key may hold a list or a single string; anything else
/// counts as empty.
pub fn parse_preferences(raw: &str) -> Option<Preferences> {
    let start = raw.find('{')?;

    let value = serde_json::Deserializer::from_str(&raw[start..])
        .into_iter::<Value>()
        .next()?
        .ok()?;
    let object = value.as_object()?;

    let prefs = Preferences::new(
        string_list(object.get("preferred_genres")),
        string_list(object.get("style_tags")),
        string_list(object.get("avoid_tags")),
    );

    Some(prefs.normalized())
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(single)) => vec![single.clone()],
        _ => Vec::new(),
    }
}
