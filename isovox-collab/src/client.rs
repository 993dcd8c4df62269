//! HTTP client for the generative collaborator.
//!
//! Talks to the Gemini `generateContent` REST endpoint with structured
//! JSON output schemas, so critique and remix responses parse straight
//! into typed results.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use isovox_core::Block;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

use crate::error::{CollabError, CollabResult};
use crate::validate;

const MODEL_FAST: &str = "gemini-2.5-flash";
const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Blocks beyond this count are elided from the critique prompt.
const PROMPT_BLOCK_LIMIT: usize = 50;

/// Critique of the current sculpture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SculptureAnalysis {
    /// Creative title for the piece.
    pub title: String,
    /// What the sculpture looks like, abstractly or figuratively.
    pub description: String,
    /// Architectural style, e.g. Brutalist, Minimalist, Chaos.
    pub style: String,
    /// How connected the structure feels, rated 0 to 100.
    #[serde(rename = "structuralIntegrity")]
    pub structural_integrity: f64,
}

impl SculptureAnalysis {
    /// Integrity rating clamped into 0..=100.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn integrity(&self) -> u8 {
        self.structural_integrity.clamp(0.0, 100.0).round() as u8
    }
}

/// A proposed rearrangement of the current block inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemixBlueprint {
    /// Name of the new sculpture.
    pub name: String,
    /// Short description of what the arrangement represents.
    pub description: String,
    /// The proposed block placements.
    pub blocks: Vec<Block>,
}

/// Client for sculpture critique and remix requests.
///
/// Cheap to clone; all clones share one connection pool and one
/// in-flight flag, so only a single request runs at a time.
#[derive(Clone)]
pub struct CollabClient {
    inner: Arc<InnerClient>,
}

struct InnerClient {
    http: Client,
    endpoint: Url,
    api_key: String,
    in_flight: AtomicBool,
}

/// Clears the shared in-flight flag when the request finishes.
struct InFlightGuard {
    inner: Arc<InnerClient>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.inner.in_flight.store(false, Ordering::Release);
    }
}

impl CollabClient {
    /// Create a client against the default public endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CollabError::MissingApiKey`] if `api_key` is empty, or
    /// [`CollabError::Http`] if the HTTP client fails to build.
    pub fn new(api_key: &str) -> CollabResult<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key)
    }

    /// Create a client against a custom endpoint, e.g. a local proxy.
    ///
    /// # Errors
    ///
    /// Returns [`CollabError::InvalidUrl`] if the URL is malformed,
    /// [`CollabError::MissingApiKey`] if `api_key` is empty, or
    /// [`CollabError::Http`] if the HTTP client fails to build.
    pub fn with_endpoint(base_url: &str, api_key: &str) -> CollabResult<Self> {
        if api_key.is_empty() {
            return Err(CollabError::MissingApiKey);
        }

        let endpoint =
            Url::parse(base_url).map_err(|e| CollabError::InvalidUrl(e.to_string()))?;
        if endpoint.cannot_be_a_base() {
            return Err(CollabError::InvalidUrl(base_url.to_string()));
        }

        let http = Client::builder()
            .user_agent("isovox-desktop (isovox)")
            // Disable proxy detection to avoid macOS system-configuration panic
            .no_proxy()
            .build()?;

        Ok(Self {
            inner: Arc::new(InnerClient {
                http,
                endpoint,
                api_key: api_key.to_string(),
                in_flight: AtomicBool::new(false),
            }),
        })
    }

    /// Whether a request is currently in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.inner.in_flight.load(Ordering::Acquire)
    }

    fn begin_request(&self) -> CollabResult<InFlightGuard> {
        if self
            .inner
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(CollabError::Busy);
        }
        Ok(InFlightGuard {
            inner: Arc::clone(&self.inner),
        })
    }

    /// Ask the collaborator to critique the sculpture.
    ///
    /// # Errors
    ///
    /// Returns [`CollabError::EmptySculpture`] if `blocks` is empty,
    /// [`CollabError::Busy`] if another request is in flight, or a
    /// transport/parse error.
    pub async fn critique(&self, blocks: &[Block]) -> CollabResult<SculptureAnalysis> {
        if blocks.is_empty() {
            return Err(CollabError::EmptySculpture);
        }
        let _guard = self.begin_request()?;

        tracing::debug!(blocks = blocks.len(), "requesting sculpture critique");
        let text = self
            .generate(&critique_prompt(blocks)?, analysis_schema())
            .await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Ask the collaborator for a remix of the current inventory.
    ///
    /// The proposal is validated before being returned: it must keep
    /// every color's block count and must not place two blocks on the
    /// same cell. A stale proposal computed against an older sculpture
    /// fails this check and is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`CollabError::EmptySculpture`] if `blocks` is empty,
    /// [`CollabError::Busy`] if another request is in flight, an
    /// [`CollabError::InventoryMismatch`] or
    /// [`CollabError::OverlappingBlock`] if the proposal is invalid, or a
    /// transport/parse error.
    pub async fn remix(&self, blocks: &[Block]) -> CollabResult<RemixBlueprint> {
        if blocks.is_empty() {
            return Err(CollabError::EmptySculpture);
        }
        let _guard = self.begin_request()?;

        tracing::debug!(blocks = blocks.len(), "requesting sculpture remix");
        let text = self
            .generate(&remix_prompt(blocks)?, remix_schema())
            .await?;
        let blueprint: RemixBlueprint = serde_json::from_str(&text)?;

        let current = validate::color_counts(blocks);
        validate::check_proposal(&current, &blueprint.blocks)?;

        tracing::info!(
            name = %blueprint.name,
            blocks = blueprint.blocks.len(),
            "remix proposal validated"
        );
        Ok(blueprint)
    }

    async fn generate(&self, prompt: &str, schema: Value) -> CollabResult<String> {
        let mut url = self.inner.endpoint.clone();
        url.set_path(&format!("/v1beta/models/{MODEL_FAST}:generateContent"));

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
            },
        });

        let response = self
            .inner
            .http
            .post(url)
            .header("x-goog-api-key", &self.inner.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CollabError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: Value = response.json().await?;
        extract_text(&payload).map(str::to_string)
    }
}

/// Pull the generated text out of a `generateContent` response.
fn extract_text(payload: &Value) -> CollabResult<&str> {
    payload
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            CollabError::UnexpectedResponse("response contained no generated text".to_string())
        })
}

fn critique_prompt(blocks: &[Block]) -> CollabResult<String> {
    let mut colors: Vec<&str> = blocks.iter().map(|b| b.color.as_str()).collect();
    colors.sort_unstable();
    colors.dedup();

    let sample = &blocks[..blocks.len().min(PROMPT_BLOCK_LIMIT)];
    Ok(format!(
        "I have built a 3D voxel sculpture with {count} blocks.\n\
         The colors used are: {colors}.\n\
         Here is the coordinate data (x, y, z, color) for a few representative blocks \
         (or all if small):\n{sample}... (truncated if too long).\n\n\
         Please analyze this sculpture.\n\
         1. Give it a creative, artistic title.\n\
         2. Describe what it looks like abstractly or figuratively.\n\
         3. Identify its architectural style (e.g., Brutalist, Minimalist, Chaos).\n\
         4. Rate its \"structural integrity\" from 0 to 100 based on how connected it feels \
         (hypothetically).",
        count = blocks.len(),
        colors = colors.join(", "),
        sample = serde_json::to_string(sample)?,
    ))
}

fn remix_prompt(blocks: &[Block]) -> CollabResult<String> {
    let counts = validate::color_counts(blocks);
    Ok(format!(
        "I have a set of voxel blocks:\n{counts}\nTotal blocks: {total}.\n\n\
         I want you to design a completely NEW sculpture using EXACTLY this inventory of \
         blocks.\nThe structure should be coherent and interesting.\n\n\
         Return the new coordinates. The coordinates must be integers, preferably centered \
         around 0,0,0 or within a 10x10x10 range.\nEnsure no two blocks overlap.",
        counts = serde_json::to_string(&counts)?,
        total = blocks.len(),
    ))
}

fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "description": { "type": "STRING" },
            "style": { "type": "STRING" },
            "structuralIntegrity": { "type": "NUMBER" },
        },
        "required": ["title", "description", "style", "structuralIntegrity"],
    })
}

fn remix_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "description": { "type": "STRING" },
            "blocks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "x": { "type": "INTEGER" },
                        "y": { "type": "INTEGER" },
                        "z": { "type": "INTEGER" },
                        "color": { "type": "STRING" },
                    },
                    "required": ["x", "y", "z", "color"],
                },
            },
        },
        "required": ["name", "description", "blocks"],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use isovox_core::GridCoord;

    fn block(x: i32, y: i32, z: i32, color: &str) -> Block {
        Block {
            coord: GridCoord::new(x, y, z),
            color: color.to_string(),
        }
    }

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(matches!(
            CollabClient::new(""),
            Err(CollabError::MissingApiKey)
        ));
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(matches!(
            CollabClient::with_endpoint("not a url", "key"),
            Err(CollabError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_in_flight_guard_serializes_requests() {
        let client = CollabClient::new("key").expect("client builds");
        assert!(!client.is_busy());

        let guard = client.begin_request().expect("first acquire succeeds");
        assert!(client.is_busy());
        assert!(matches!(client.begin_request(), Err(CollabError::Busy)));

        drop(guard);
        assert!(!client.is_busy());
        assert!(client.begin_request().is_ok());
    }

    #[tokio::test]
    async fn test_empty_sculpture_short_circuits() {
        let client = CollabClient::new("key").expect("client builds");
        assert!(matches!(
            client.critique(&[]).await,
            Err(CollabError::EmptySculpture)
        ));
        assert!(matches!(
            client.remix(&[]).await,
            Err(CollabError::EmptySculpture)
        ));
        assert!(!client.is_busy());
    }

    #[test]
    fn test_extract_text_from_candidates() {
        let payload = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "{\"title\":\"Azure Spire\"}" }],
                    "role": "model",
                },
                "finishReason": "STOP",
            }],
        });
        assert_eq!(
            extract_text(&payload).expect("text present"),
            "{\"title\":\"Azure Spire\"}"
        );
    }

    #[test]
    fn test_extract_text_missing_is_error() {
        let payload = serde_json::json!({ "candidates": [] });
        assert!(matches!(
            extract_text(&payload),
            Err(CollabError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn test_analysis_parses_and_clamps() {
        let analysis: SculptureAnalysis = serde_json::from_str(
            r#"{
                "title": "Azure Spire",
                "description": "A lone tower reaching upward.",
                "style": "Minimalist",
                "structuralIntegrity": 172.4
            }"#,
        )
        .expect("analysis parses");
        assert_eq!(analysis.title, "Azure Spire");
        assert_eq!(analysis.integrity(), 100);
    }

    #[test]
    fn test_blueprint_parses_wire_blocks() {
        let blueprint: RemixBlueprint = serde_json::from_str(
            r##"{
                "name": "Twin Steps",
                "description": "Two offset stairways.",
                "blocks": [
                    { "x": 0, "y": 0, "z": 0, "color": "#3b82f6" },
                    { "x": 1, "y": 0, "z": 0, "color": "#3b82f6" }
                ]
            }"##,
        )
        .expect("blueprint parses");
        assert_eq!(blueprint.blocks.len(), 2);
        assert_eq!(blueprint.blocks[0].coord, GridCoord::ORIGIN);
    }

    #[test]
    fn test_critique_prompt_mentions_inventory() {
        let blocks = vec![block(0, 0, 0, "#3b82f6"), block(1, 0, 0, "#ef4444")];
        let prompt = critique_prompt(&blocks).expect("prompt builds");
        assert!(prompt.contains("2 blocks"));
        assert!(prompt.contains("#3b82f6"));
        assert!(prompt.contains("#ef4444"));
    }

    #[test]
    fn test_critique_prompt_truncates_sample() {
        let blocks: Vec<Block> = (0..120).map(|x| block(x, 0, 0, "#ffffff")).collect();
        let prompt = critique_prompt(&blocks).expect("prompt builds");
        assert!(prompt.contains("120 blocks"));
        assert!(prompt.contains("\"x\":49"));
        assert!(!prompt.contains("\"x\":50,"));
    }

    #[test]
    fn test_remix_prompt_carries_color_counts() {
        let blocks = vec![
            block(0, 0, 0, "#3b82f6"),
            block(1, 0, 0, "#3b82f6"),
            block(2, 0, 0, "#ef4444"),
        ];
        let prompt = remix_prompt(&blocks).expect("prompt builds");
        assert!(prompt.contains("Total blocks: 3"));
        assert!(prompt.contains("#3b82f6"));
        assert!(prompt.contains("no two blocks overlap"));
    }
}
