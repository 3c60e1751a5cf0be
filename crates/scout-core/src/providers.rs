//! Model → provider derivation and the built-in provider catalog.
//!
//! Provider identity is never chosen by the caller; it is derived from the
//! model identifier by vendor naming conventions. Keep every such rule inside
//! [`determine_provider`] so the matching can be swapped in one place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Provider used when no naming rule matches a model.
pub const FALLBACK_PROVIDER: &str = "google";

/// Models the backend's deep researcher accepts.
pub const RESEARCH_MODELS: [&str; 2] = ["gemini-2.5-flash-preview-04-17", "gemini-2.0-flash"];

/// Suggested replacement when a model is not research-capable.
pub const DEFAULT_RESEARCH_MODEL: &str = "gemini-2.0-flash";

/// Model selected when nothing else has been chosen.
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro-preview";

/// Ordered naming rules: `(prefixes, substrings, provider)`.
const PROVIDER_RULES: &[(&[&str], &[&str], &str)] = &[
    (&["gpt-"], &["openai"], "openai"),
    (&["claude-"], &["anthropic"], "anthropic"),
    (&["gemini-"], &["gemini", "google"], "google"),
    (&["deepseek-"], &["deepseek"], "deepseek"),
    (&["grok-"], &["grok", "xai"], "xai"),
];

/// Derive the provider id for a model identifier.
///
/// Pure and total: every string maps to exactly one provider, unknown models
/// map to [`FALLBACK_PROVIDER`]. Matching is case-sensitive (`GPT-4o` falls
/// back); only surrounding whitespace is ignored.
#[must_use]
pub fn determine_provider(model: &str) -> &'static str {
    let model = model.trim();
    PROVIDER_RULES
        .iter()
        .find(|(prefixes, substrings, _)| {
            prefixes.iter().any(|p| model.starts_with(p))
                || substrings.iter().any(|s| model.contains(s))
        })
        .map_or(FALLBACK_PROVIDER, |(_, _, provider)| *provider)
}

/// Whether `model` may be used for deep research.
#[must_use]
pub fn is_research_capable(model: &str) -> bool {
    RESEARCH_MODELS.contains(&model.trim())
}

// ── Catalog ────────────────────────────────────────────────────────

/// A selectable model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
}

/// Provider metadata as listed by the backend's `/providers` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    #[serde(default)]
    pub models: Vec<ModelInfo>,
    /// Whether the backend needs an API key for this provider.
    #[serde(default)]
    pub requires_key: bool,
    /// Environment variable the backend reads the key from.
    #[serde(default)]
    pub key_env: String,
}

fn provider(name: &str, key_env: &str, models: &[(&str, &str)]) -> ProviderInfo {
    ProviderInfo {
        name: name.to_string(),
        models: models
            .iter()
            .map(|(id, name)| ModelInfo {
                id: (*id).to_string(),
                name: (*name).to_string(),
            })
            .collect(),
        requires_key: true,
        key_env: key_env.to_string(),
    }
}

/// Static provider table, used when the backend listing is unavailable.
#[must_use]
pub fn builtin_catalog() -> BTreeMap<String, ProviderInfo> {
    BTreeMap::from([
        (
            "google".to_string(),
            provider(
                "Google",
                "GEMINI_API_KEY",
                &[
                    ("gemini-2.5-pro-preview", "Gemini 2.5 Pro Preview"),
                    ("gemini-2.5-flash-preview-04-17", "Gemini 2.5 Flash"),
                    ("gemini-2.0-flash", "Gemini 2.0 Flash"),
                ],
            ),
        ),
        (
            "openai".to_string(),
            provider(
                "OpenAI",
                "OPENAI_API_KEY",
                &[
                    ("gpt-4o", "GPT-4o"),
                    ("gpt-4o-no-vision", "GPT-4o (no vision)"),
                    ("gpt-4o-viewport-0", "GPT-4o (viewport 0)"),
                    ("gpt-4o-no-boundingbox", "GPT-4o (no bounding box)"),
                    ("gpt-4.1", "GPT-4.1"),
                ],
            ),
        ),
        (
            "anthropic".to_string(),
            provider(
                "Anthropic",
                "ANTHROPIC_API_KEY",
                &[
                    ("claude-3.7-sonnet", "Claude 3.7 Sonnet"),
                    ("claude-3.6", "Claude 3.6"),
                    ("claude-3.5", "Claude 3.5"),
                ],
            ),
        ),
        (
            "deepseek".to_string(),
            provider(
                "DeepSeek",
                "DEEPSEEK_API_KEY",
                &[("deepseek-chat", "DeepSeek Chat"), ("deepseek-r1", "DeepSeek R1")],
            ),
        ),
        (
            "xai".to_string(),
            provider("xAI", "GROK_API_KEY", &[("grok-2-1212", "Grok 2")]),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("gpt-4o", "openai")]
    #[case("gpt-4.1", "openai")]
    #[case("azure-openai-large", "openai")]
    #[case("gemini-2.0-flash", "google")]
    #[case("models/google-palm", "google")]
    #[case("claude-3.7-sonnet", "anthropic")]
    #[case("anthropic.claude-v2", "anthropic")]
    #[case("deepseek-r1", "deepseek")]
    #[case("grok-2-1212", "xai")]
    #[case("xai-beta", "xai")]
    #[case("  gemini-2.5-pro-preview  ", "google")]
    fn derives_provider_from_naming_convention(#[case] model: &str, #[case] expected: &str) {
        assert_eq!(determine_provider(model), expected);
    }

    #[rstest]
    #[case("unknown-model-x")]
    #[case("")]
    #[case("llama-3-70b")]
    #[case("🦀")]
    #[case("GPT-4o")]
    #[case("Claude-3-Opus")]
    fn unmatched_models_use_fallback(#[case] model: &str) {
        assert_eq!(determine_provider(model), FALLBACK_PROVIDER);
    }

    #[test]
    fn derivation_is_deterministic() {
        for model in ["gpt-4o", "claude-3.5", "mystery"] {
            assert_eq!(determine_provider(model), determine_provider(model));
        }
    }

    #[test]
    fn research_allow_list_has_two_gemini_models() {
        assert_eq!(RESEARCH_MODELS.len(), 2);
        for model in RESEARCH_MODELS {
            assert!(is_research_capable(model));
            assert_eq!(determine_provider(model), "google");
        }
        assert!(!is_research_capable("gpt-4o"));
        assert!(!is_research_capable(DEFAULT_MODEL));
        assert!(is_research_capable(DEFAULT_RESEARCH_MODEL));
    }

    #[test]
    fn catalog_models_derive_their_own_provider() {
        for (id, info) in builtin_catalog() {
            assert!(info.requires_key, "{id}");
            for model in &info.models {
                assert_eq!(determine_provider(&model.id), id, "{}", model.id);
            }
        }
    }

    #[test]
    fn provider_info_tolerates_missing_optional_fields() {
        let info: ProviderInfo = serde_json::from_str(r#"{"name": "Local"}"#).unwrap();
        assert_eq!(info.name, "Local");
        assert!(info.models.is_empty());
        assert!(!info.requires_key);
        assert!(info.key_env.is_empty());
    }
}
