//! PDF validation, page counting and merge
//!
//! The merged artifact carries pages in the exact order: cover page first,
//! then each submitted document's pages in submission order. Merging lifts
//! page objects out of each source document, renumbering object ids so the
//! combined object table has no collisions, then rebuilds a single Pages
//! tree and Catalog.

use super::{DocumentError, DocumentResult};
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;

/// Number of pages in a PDF.
pub fn page_count(bytes: &[u8]) -> DocumentResult<usize> {
    let doc = Document::load_mem(bytes).map_err(|e| DocumentError::Invalid(e.to_string()))?;
    Ok(doc.get_pages().len())
}

/// Validate a submitted PDF: must parse, have at least one page and stay
/// under the page limit. Returns the page count.
pub fn validate(bytes: &[u8], max_pages: usize) -> DocumentResult<usize> {
    let pages = page_count(bytes)?;
    if pages == 0 {
        return Err(DocumentError::Empty);
    }
    if pages > max_pages {
        return Err(DocumentError::TooManyPages {
            max: max_pages,
            actual: pages,
        });
    }
    Ok(pages)
}

/// Name of a PDF object's /Type entry, if it has one.
fn object_type(object: &Object) -> Option<Vec<u8>> {
    object
        .as_dict()
        .ok()
        .and_then(|dict| dict.get(b"Type").ok())
        .and_then(|t| t.as_name().ok())
        .map(|name| name.to_vec())
}

/// Merge the cover page and the submitted documents into one PDF.
///
/// Inputs are consumed; each source buffer is dropped as soon as its pages
/// have been lifted into the merged object table, keeping peak memory close
/// to the output size. Returns the merged bytes and the total page count
/// (cover included).
pub fn assemble(cover: Vec<u8>, documents: Vec<Vec<u8>>) -> DocumentResult<(Vec<u8>, u32)> {
    let mut max_id = 1u32;
    let mut page_order: Vec<ObjectId> = Vec::new();
    let mut page_objects: BTreeMap<ObjectId, Object> = BTreeMap::new();
    let mut all_objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for bytes in std::iter::once(cover).chain(documents) {
        let mut doc =
            Document::load_mem(&bytes).map_err(|e| DocumentError::Invalid(e.to_string()))?;
        drop(bytes);

        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        // get_pages() is keyed by page number, so iteration preserves the
        // document's internal page order.
        for (_, object_id) in doc.get_pages() {
            let object = doc
                .get_object(object_id)
                .map_err(|e| DocumentError::Invalid(e.to_string()))?
                .to_owned();
            page_order.push(object_id);
            page_objects.insert(object_id, object);
        }
        all_objects.append(&mut doc.objects);
    }

    if page_order.is_empty() {
        return Err(DocumentError::Empty);
    }

    // Pick one Catalog and fold every Pages dictionary into a single root.
    let mut catalog: Option<(ObjectId, Object)> = None;
    let mut pages_root: Option<(ObjectId, Object)> = None;
    let mut merged = Document::with_version("1.5");

    for (object_id, object) in all_objects {
        match object_type(&object).as_deref() {
            Some(b"Catalog") => {
                catalog.get_or_insert((object_id, object));
            }
            Some(b"Pages") => {
                if let Ok(dict) = object.as_dict() {
                    let mut dict = dict.clone();
                    if let Some((_, ref existing)) = pages_root
                        && let Ok(existing_dict) = existing.as_dict()
                    {
                        dict.extend(existing_dict);
                    }
                    pages_root = Some((object_id, Object::Dictionary(dict)));
                }
            }
            // Page objects are re-parented below; outlines are dropped
            Some(b"Page") | Some(b"Outlines") | Some(b"Outline") => {}
            _ => {
                merged.objects.insert(object_id, object);
            }
        }
    }

    let (pages_id, pages_object) = pages_root
        .ok_or_else(|| DocumentError::Invalid("no Pages root found".to_string()))?;
    let (catalog_id, catalog_object) =
        catalog.ok_or_else(|| DocumentError::Invalid("no Catalog found".to_string()))?;

    for object_id in &page_order {
        if let Some(object) = page_objects.get(object_id)
            && let Ok(dict) = object.as_dict()
        {
            let mut dict = dict.clone();
            dict.set("Parent", pages_id);
            merged.objects.insert(*object_id, Object::Dictionary(dict));
        }
    }

    let mut pages_dict = pages_object
        .as_dict()
        .map_err(|e| DocumentError::Invalid(e.to_string()))?
        .clone();
    pages_dict.set("Count", page_order.len() as i64);
    pages_dict.set(
        "Kids",
        page_order
            .iter()
            .map(|id| Object::Reference(*id))
            .collect::<Vec<_>>(),
    );
    merged.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let mut catalog_dict = catalog_object
        .as_dict()
        .map_err(|e| DocumentError::Invalid(e.to_string()))?
        .clone();
    catalog_dict.set("Pages", pages_id);
    catalog_dict.remove(b"Outlines");
    merged
        .objects
        .insert(catalog_id, Object::Dictionary(catalog_dict));

    merged.trailer.set("Root", catalog_id);
    merged.max_id = merged.objects.len() as u32;
    merged.renumber_objects();
    merged.compress();

    let total_pages = page_order.len() as u32;
    let mut buffer = Vec::new();
    merged
        .save_to(&mut buffer)
        .map_err(|e| DocumentError::Write(e.to_string()))?;

    Ok((buffer, total_pages))
}
