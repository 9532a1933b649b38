use crate::payment::RecipientFacts;
use crate::pricing::PriceTable;

/// Server configuration
///
/// # Environment variables
///
/// Every item can be overridden through environment variables:
///
/// | Variable | Default | Notes |
/// |----------|---------|-------|
/// | WORK_DIR | /var/lib/print-server | database, logs, status file |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| production |
/// | MAX_FILES | 10 | files per submission |
/// | MAX_FILE_SIZE | 52428800 | 50 MB per file |
/// | MAX_TOTAL_SIZE | 1073741824 | 1 GB per submission |
/// | MAX_PAGES_PER_DOCUMENT | 500 | pages per uploaded PDF |
/// | MAX_SCREENSHOT_SIZE | 10485760 | 10 MB payment screenshot |
/// | MIN_OCR_TEXT_LENGTH | 20 | shorter OCR output is rejected |
/// | RECIPIENT_NAME | UNMAN CHAUDHURI | UPI account holder name |
/// | RECIPIENT_PHONE | 9876543210 | phone linked to the UPI account |
/// | RECIPIENT_UPI_ID | unman2017@upi | shown on the payment page |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/print HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database, logs and status file
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | production
    pub environment: String,
    /// Database file name inside the work directory
    pub database_file: String,

    // === Upload limits ===
    /// Maximum number of files per submission
    pub max_files: usize,
    /// Maximum size of a single uploaded PDF (bytes)
    pub max_file_size: usize,
    /// Maximum combined size of one submission (bytes)
    pub max_total_size: usize,
    /// Maximum page count of a single uploaded PDF
    pub max_pages_per_document: usize,
    /// Maximum copies of a single order
    pub max_copies: u32,

    // === Payment verification ===
    /// Maximum payment screenshot size (bytes)
    pub max_screenshot_size: usize,
    /// Minimum OCR text length for a screenshot to be considered readable
    pub min_ocr_text_length: usize,
    /// Identity facts of the shop's payment recipient
    pub recipient: RecipientFacts,

    /// Per-page rates and surcharges
    pub prices: PriceTable,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/print-server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            database_file: "print_orders.redb".into(),

            max_files: std::env::var("MAX_FILES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            max_file_size: std::env::var("MAX_FILE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50 * 1024 * 1024),
            max_total_size: std::env::var("MAX_TOTAL_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024 * 1024 * 1024),
            max_pages_per_document: std::env::var("MAX_PAGES_PER_DOCUMENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
            max_copies: 10,

            max_screenshot_size: std::env::var("MAX_SCREENSHOT_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10 * 1024 * 1024),
            min_ocr_text_length: std::env::var("MIN_OCR_TEXT_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            recipient: RecipientFacts {
                name_variants: recipient_name_variants(),
                phone: std::env::var("RECIPIENT_PHONE")
                    .unwrap_or_else(|_| "9876543210".into()),
                upi_id: std::env::var("RECIPIENT_UPI_ID")
                    .unwrap_or_else(|_| "unman2017@upi".into()),
            },

            prices: PriceTable::default(),
        }
    }

    /// Override the work directory and port (for testing)
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Path of the redb database file
    pub fn database_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.work_dir).join(&self.database_file)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Name variants as the different UPI apps render the account holder.
///
/// `RECIPIENT_NAME` replaces the primary; the spacing/case variants are
/// derived from it.
fn recipient_name_variants() -> Vec<String> {
    let primary =
        std::env::var("RECIPIENT_NAME").unwrap_or_else(|_| "UNMAN CHAUDHURI".to_string());
    let mut variants = vec![primary.clone(), title_case(&primary)];
    // some apps pad with a double space between the name parts
    variants.push(primary.replace(' ', "  "));
    variants.dedup();
    variants
}

fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_env();
        assert_eq!(config.max_files, 10);
        assert_eq!(config.max_file_size, 50 * 1024 * 1024);
        assert_eq!(config.max_copies, 10);
        assert_eq!(config.min_ocr_text_length, 20);
        assert!(!config.recipient.name_variants.is_empty());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("UNMAN CHAUDHURI"), "Unman Chaudhuri");
    }

    #[test]
    fn test_database_path_joins_work_dir() {
        let config = Config::with_overrides("/tmp/print-test", 0);
        assert_eq!(
            config.database_path(),
            std::path::PathBuf::from("/tmp/print-test/print_orders.redb")
        );
    }
}
