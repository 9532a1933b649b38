use super::*;
use crate::documents::assembler::testing::make_pdf;
use crate::payment::extractor::testing::FixedExtractor;
use shared::OrderStatus;

// ========================================================================
// Helpers: managers and submissions
// ========================================================================

fn manager_with_extractor(extractor: Arc<dyn TextExtractor>) -> OrdersManager {
    let store = OrderStore::open_in_memory().unwrap();
    let status = ServiceStatusService::in_memory();
    OrdersManager::new(store, status, extractor, &Config::from_env())
}

fn test_manager() -> OrdersManager {
    manager_with_extractor(Arc::new(FixedExtractor(String::new())))
}

/// A default submission: one 3-page black & white A4 single-sided file.
fn request(name: &str, files: Vec<(&str, Vec<u8>)>) -> SubmitRequest {
    SubmitRequest {
        student_name: name.to_string(),
        student_id: "12023052016".to_string(),
        instructions: String::new(),
        settings: PrintSettings::default(),
        transaction_id: None,
        files: files
            .into_iter()
            .map(|(filename, bytes)| (filename.to_string(), bytes))
            .collect(),
    }
}

fn submit_one(manager: &OrdersManager, name: &str) -> Order {
    manager
        .submit(request(name, vec![("notes.pdf", make_pdf("A", 3))]))
        .unwrap()
}

mod test_flows;
mod test_payment;
mod test_queue;
