//! Print Order Model
//!
//! The central entity of the queue. An order is created once with all of
//! its print settings, page count and estimated cost fixed; afterwards only
//! the status (and `completed_at`) may change. The merged PDF artifact is
//! stored separately and never serialized with the record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Order status
///
/// `Completed` and `Cancelled` are terminal: entries are retained for
/// history and statistics but excluded from queue ordering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

/// Color mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Bw,
    Color,
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bw" => Ok(Self::Bw),
            "color" => Ok(Self::Color),
            other => Err(format!("invalid color_mode '{other}' (expected bw|color)")),
        }
    }
}

/// Single or double sided printing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PrintSides {
    #[default]
    Single,
    Double,
}

impl FromStr for PrintSides {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            other => Err(format!(
                "invalid print_sides '{other}' (expected single|double)"
            )),
        }
    }
}

/// Paper type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaperType {
    #[default]
    Normal,
    Photopaper,
}

impl FromStr for PaperType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "photopaper" => Ok(Self::Photopaper),
            other => Err(format!(
                "invalid paper_type '{other}' (expected normal|photopaper)"
            )),
        }
    }
}

/// Page size
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    A4,
    A3,
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A4" | "a4" => Ok(Self::A4),
            "A3" | "a3" => Ok(Self::A3),
            other => Err(format!("invalid page_size '{other}' (expected A4|A3)")),
        }
    }
}

/// Binding option
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Binding {
    #[default]
    None,
    Spiral,
    Soft,
}

impl FromStr for Binding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "spiral" => Ok(Self::Spiral),
            "soft" => Ok(Self::Soft),
            other => Err(format!(
                "invalid binding '{other}' (expected none|spiral|soft)"
            )),
        }
    }
}

/// Print settings, immutable once the order is created
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrintSettings {
    pub color_mode: ColorMode,
    pub paper_type: PaperType,
    pub print_sides: PrintSides,
    pub page_size: PageSize,
    pub binding: Binding,
    pub copies: u32,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Bw,
            paper_type: PaperType::Normal,
            print_sides: PrintSides::Single,
            page_size: PageSize::A4,
            binding: Binding::None,
            copies: 1,
        }
    }
}

/// Order entity
///
/// `queue_position` is a tail ticket: assigned as max(pending)+1 at
/// creation and never renumbered, so positions may have gaps after
/// completions. The pending entry with the lowest position is the head of
/// the queue and the only one staff may act on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    pub queue_position: u64,
    pub status: OrderStatus,

    // Student info
    pub student_name: String,
    pub student_id: String,
    pub instructions: String,

    // Print settings
    #[serde(flatten)]
    pub settings: PrintSettings,
    pub total_pages: u32,

    // Cost, fixed at creation (no re-pricing on mutation)
    pub estimated_cost: f64,

    // Artifact metadata (bytes live in their own table)
    pub file_size: u64,
    pub original_filenames: Vec<String>,

    // Timestamps
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,

    // Payment
    pub transaction_id: Option<String>,
}

impl Order {
    /// Create a new pending order with a fresh id.
    ///
    /// The queue position is assigned by the store at insert time.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        student_name: String,
        student_id: String,
        instructions: String,
        settings: PrintSettings,
        total_pages: u32,
        estimated_cost: f64,
        file_size: u64,
        original_filenames: Vec<String>,
        transaction_id: Option<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            queue_position: 0,
            status: OrderStatus::Pending,
            student_name,
            student_id,
            instructions,
            settings,
            total_pages,
            estimated_cost,
            file_size,
            original_filenames,
            created_at: Utc::now(),
            completed_at: None,
            transaction_id,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }
}

/// Order annotated with its head-of-queue flag for list views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    #[serde(flatten)]
    pub order: Order,
    /// Whether this order is currently first in the queue
    pub is_first: bool,
}

/// Dashboard statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueStats {
    pub pending_count: u64,
    /// Orders completed within the current (server-local) calendar day
    pub completed_today: u64,
}
