//! Reports printed by the CLI.
//!
//! Every command builds a serializable report. `--json` prints it with
//! `serde_json`; otherwise [`Render`] turns it into plain text lines.

use respack::layout::DecodedResult;
use respack::{LayoutError, RuntimeLayout, get_category, get_code};
use serde::Serialize;
use thiserror::Error;

use crate::app::{self, AppErrors, Category, SubCategory};
use crate::config::{ConfigError, LayoutConfig};

/// Errors raised by the CLI commands.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Input that is not a decimal, `0x` or `0b` integer.
    #[error("Invalid raw value '{input}': {reason}")]
    InvalidRaw { input: String, reason: String },

    /// Input with bits set above the decoded width.
    #[error("Raw value {raw:#x} does not fit in {bits} bits")]
    RawTooWide { raw: u128, bits: u32 },

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a raw code: decimal, `0x` hexadecimal or `0b` binary. Underscores
/// are allowed as digit separators.
///
/// # Errors
///
/// Returns `DemoError::InvalidRaw` if the digits do not parse.
pub fn parse_raw(input: &str) -> Result<u128, DemoError> {
    let trimmed = input.trim();
    let (digits, radix) = if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        (hex, 16)
    } else if let Some(bin) = trimmed
        .strip_prefix("0b")
        .or_else(|| trimmed.strip_prefix("0B"))
    {
        (bin, 2)
    } else {
        (trimmed, 10)
    };

    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    u128::from_str_radix(&digits, radix).map_err(|e| DemoError::InvalidRaw {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Plain-text rendering of a report.
pub trait Render {
    /// One line per entry, no trailing newline.
    fn render(&self) -> String;
}

// ─── run ────────────────────────────────────────────────────────────

/// One error collected by the sample application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    pub slot: usize,
    pub raw: u8,
    pub category: u64,
    pub category_name: &'static str,
    pub subcategory: u64,
    pub subcategory_name: &'static str,
    pub code: u8,
    pub description: Option<&'static str>,
}

/// Outcome of `respack_demo run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub service: String,
    pub success: bool,
    pub raw: u32,
    pub errors: Vec<ErrorEntry>,
}

impl RunReport {
    /// Describe every error the aggregate holds, slot 0 first.
    pub fn new(service: &str, errors: &AppErrors) -> Self {
        let entries = errors
            .iterate_errors()
            .enumerate()
            .map(|(slot, result)| {
                let category = get_category::<Category, _>(result);
                let subcategory = get_category::<SubCategory, _>(result);
                ErrorEntry {
                    slot,
                    raw: result.raw(),
                    category: category.value(),
                    category_name: app::category_name(category),
                    subcategory: subcategory.value(),
                    subcategory_name: app::subcategory_name(category, subcategory),
                    code: get_code(result),
                    description: app::describe(result),
                }
            })
            .collect();

        Self {
            service: service.to_string(),
            success: errors.is_success(),
            raw: errors.raw(),
            errors: entries,
        }
    }
}

impl Render for RunReport {
    fn render(&self) -> String {
        if self.success {
            return format!("{}: success", self.service);
        }
        let mut lines = vec![format!(
            "{}: {} error(s), raw {:#010x}",
            self.service,
            self.errors.len(),
            self.raw
        )];
        for e in &self.errors {
            lines.push(format!(
                "  [{}] {:#04x} {}({}) / {}({}) code {}{}",
                e.slot,
                e.raw,
                e.category_name,
                e.category,
                e.subcategory_name,
                e.subcategory,
                e.code,
                e.description.map(|d| format!(": {d}")).unwrap_or_default()
            ));
        }
        lines.join("\n")
    }
}

// ─── decode ─────────────────────────────────────────────────────────

/// A decoded result with its category names attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedResult {
    pub raw: u64,
    pub success: bool,
    pub categories: Vec<(String, u64)>,
    pub code: u64,
}

impl NamedResult {
    fn new(layout: &LayoutConfig, decoded: &DecodedResult) -> Self {
        Self {
            raw: decoded.raw,
            success: decoded.is_success(),
            categories: layout
                .names()
                .map(str::to_string)
                .zip(decoded.categories.iter().copied())
                .collect(),
            code: decoded.code,
        }
    }

    fn render(&self) -> String {
        if self.success {
            return format!("{:#x} success", self.raw);
        }
        let fields: Vec<String> = self
            .categories
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        format!("{:#x} {} code={}", self.raw, fields.join(" "), self.code)
    }
}

/// One decoded command-line input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeEntry {
    pub input: String,
    pub results: Vec<NamedResult>,
}

/// Outcome of `respack_demo decode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeReport {
    pub aggregate: bool,
    pub entries: Vec<DecodeEntry>,
}

impl DecodeReport {
    /// Decode every input as a single result, or as an aggregate when
    /// `aggregate` is set.
    ///
    /// # Errors
    ///
    /// Fails on the first input that does not parse or does not fit.
    pub fn new(config: &LayoutConfig, inputs: &[String], aggregate: bool) -> Result<Self, DemoError> {
        let layout = config.to_runtime()?;
        let bits = if aggregate {
            config.aggregate_bits
        } else {
            layout.storage_bits()
        };

        let mut entries = Vec::with_capacity(inputs.len());
        for input in inputs {
            let raw = parse_raw(input)?;
            if bits < u128::BITS && raw >> bits != 0 {
                return Err(DemoError::RawTooWide { raw, bits });
            }

            let results = if aggregate {
                layout
                    .decode_aggregate(raw, config.aggregate_bits)?
                    .iter()
                    .map(|decoded| NamedResult::new(config, decoded))
                    .collect()
            } else {
                vec![NamedResult::new(config, &layout.decode(raw))]
            };
            entries.push(DecodeEntry {
                input: input.clone(),
                results,
            });
        }

        Ok(Self { aggregate, entries })
    }
}

impl Render for DecodeReport {
    fn render(&self) -> String {
        let mut lines = Vec::new();
        for entry in &self.entries {
            if self.aggregate {
                lines.push(format!("{}: {} result(s)", entry.input, entry.results.len()));
                for (slot, result) in entry.results.iter().enumerate() {
                    lines.push(format!("  [{slot}] {}", result.render()));
                }
            } else {
                for result in &entry.results {
                    lines.push(format!("{}: {}", entry.input, result.render()));
                }
            }
        }
        lines.join("\n")
    }
}

// ─── layout ─────────────────────────────────────────────────────────

/// One field of the configured layout, MSB first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldEntry {
    pub name: String,
    pub offset: u32,
    pub width: u32,
    pub mask: u64,
}

/// Outcome of `respack_demo layout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutReport {
    pub storage_bits: u32,
    pub aggregate_bits: u32,
    pub capacity: u32,
    pub fields: Vec<FieldEntry>,
}

impl LayoutReport {
    /// Describe the configured layout.
    ///
    /// # Errors
    ///
    /// Returns the configuration error if the layout is invalid.
    pub fn new(config: &LayoutConfig) -> Result<Self, DemoError> {
        let layout: RuntimeLayout = config.to_runtime()?;
        let capacity = layout.aggregate_capacity(config.aggregate_bits)?;

        let mut fields: Vec<FieldEntry> = config
            .names()
            .zip(layout.categories())
            .map(|(name, span)| FieldEntry {
                name: name.to_string(),
                offset: span.offset,
                width: span.width,
                mask: span.mask() as u64,
            })
            .collect();
        let code = layout.code();
        fields.push(FieldEntry {
            name: "code".to_string(),
            offset: code.offset,
            width: code.width,
            mask: code.mask() as u64,
        });

        Ok(Self {
            storage_bits: layout.storage_bits(),
            aggregate_bits: config.aggregate_bits,
            capacity,
            fields,
        })
    }
}

impl Render for LayoutReport {
    fn render(&self) -> String {
        let mut lines = vec![format!(
            "{}-bit results, {} per {}-bit aggregate",
            self.storage_bits, self.capacity, self.aggregate_bits
        )];
        for f in &self.fields {
            lines.push(format!(
                "  {:<16} bits {:>2}..{:<2} width {:>2} mask {:#x}",
                f.name,
                f.offset,
                f.offset + f.width,
                f.width,
                f.mask
            ));
        }
        lines.join("\n")
    }
}
