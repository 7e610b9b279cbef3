//! Compile pipeline: fetch, extract, render, assemble

use crate::alert::{AlertContent, AlertMessage, AlertSampleMessage};
use crate::config::{Config, EmptyHitsPolicy};
use crate::context::{build_output_labels, build_render_context};
use crate::extract::{extract_fields, ExtractedFields};
use crate::fetcher::DocumentFetcher;
use crate::payload::{serialize_payloads, NotificationPayload};
use crate::render::TemplateRenderer;

/// Turns a fired or resolved alert into the message handed to delivery.
///
/// Holds no per-alert state, so one compiler can serve concurrent callers.
#[derive(Debug, Default)]
pub struct AlertCompiler {
    renderer: TemplateRenderer,
    empty_hits: EmptyHitsPolicy,
}

impl AlertCompiler {
    pub fn new(empty_hits: EmptyHitsPolicy) -> Self {
        Self {
            renderer: TemplateRenderer::new(),
            empty_hits,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.empty_hits)
    }

    /// Fetch the matched documents and compile the alert from the first hit
    pub async fn compile(
        &self,
        content: &AlertContent<'_>,
        generator_url: &str,
        sample: &AlertSampleMessage,
        fetcher: &dyn DocumentFetcher,
    ) -> crate::Result<AlertMessage> {
        tracing::debug!(
            "Compiling {} alert for rule '{}' ({} ids)",
            content.state,
            content.rule.unique_id,
            sample.ids.len()
        );

        let documents = fetcher.find_by_ids(&sample.index, &sample.ids).await?;

        let fields = match documents.first() {
            Some(document) => extract_fields(document),
            None => match self.empty_hits {
                EmptyHitsPolicy::Error => {
                    return Err(crate::AlertError::NoHits {
                        index: sample.index.clone(),
                    })
                }
                EmptyHitsPolicy::EmptyFields => {
                    tracing::warn!(
                        "No documents found in '{}' for rule '{}', compiling with empty fields",
                        sample.index,
                        content.rule.unique_id
                    );
                    ExtractedFields::default()
                }
            },
        };

        self.assemble(content, generator_url, &fields)
    }

    /// Same as [`compile`](Self::compile), serialized to JSON text
    pub async fn compile_to_string(
        &self,
        content: &AlertContent<'_>,
        generator_url: &str,
        sample: &AlertSampleMessage,
        fetcher: &dyn DocumentFetcher,
    ) -> crate::Result<String> {
        let message = self
            .compile(content, generator_url, sample, fetcher)
            .await?;
        Ok(serde_json::to_string(&message)?)
    }

    /// Build the message from already-extracted fields
    pub fn assemble(
        &self,
        content: &AlertContent<'_>,
        generator_url: &str,
        fields: &ExtractedFields,
    ) -> crate::Result<AlertMessage> {
        let rule = content.rule;
        let data = build_render_context(rule, content.matched, generator_url, fields);
        let annotations = self
            .renderer
            .render_annotations(&rule.query.annotations, &data);
        let labels = build_output_labels(rule, fields);

        let payload = NotificationPayload::new(content, labels, annotations, generator_url);
        let payload = serialize_payloads(&[payload])?;

        tracing::debug!(
            "Compiled alert for rule '{}' ({} bytes)",
            rule.unique_id,
            payload.len()
        );

        Ok(AlertMessage {
            unique_id: rule.unique_id.clone(),
            path: rule.file_path.clone(),
            payload,
            starts_at: content.starts_at,
        })
    }
}
