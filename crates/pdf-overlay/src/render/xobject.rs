//! Form XObjects for composition layers
//!
//! Every layer placed on an output page is a Form XObject built in the
//! output document. Source pages are only read; their content is copied
//! into a fresh stream for each use, so no two output pages share a layer.

use crate::document::{SourceDocument, inherited_attribute};
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Maps object ids of one source document to their copies in the output
pub type CopyCache = HashMap<ObjectId, ObjectId>;

// =============================================================================
// XObject Creation
// =============================================================================

/// Create an XObject from a source page.
///
/// The content stream is always a new object. Resources are deep-copied
/// through `cache`, so fonts and images are shared between layers cut from
/// the same source document.
pub fn create_page_xobject(
    output: &mut Document,
    source: &SourceDocument,
    page_index: usize,
    cache: &mut CopyCache,
) -> Result<ObjectId> {
    let page_id = source.page_id(page_index)?;
    let media_box = source.media_box(page_index)?;
    let doc = source.document();
    let page_dict = doc.get_dictionary(page_id)?;

    let content = get_page_content(doc, page_dict)?;

    let mut xobject_dict = form_dictionary(media_box);
    if let Some(resources) = inherited_attribute(doc, page_id, b"Resources") {
        xobject_dict.set("Resources", copy_object_deep(output, doc, resources, cache)?);
    }
    if let Some(encoded) = content.encoded_by {
        for key in [&b"Filter"[..], &b"DecodeParms"[..]] {
            if let Ok(value) = encoded.dict.get(key) {
                xobject_dict.set(key.to_vec(), copy_object_deep(output, doc, value, cache)?);
            }
        }
    }

    Ok(output.add_object(Stream::new(xobject_dict, content.data)))
}

/// Create an empty XObject standing in for a padded blank page
pub fn create_blank_xobject(output: &mut Document, bbox: [f32; 4]) -> ObjectId {
    let mut xobject_dict = form_dictionary(bbox);
    xobject_dict.set("Resources", Object::Dictionary(Dictionary::new()));
    output.add_object(Stream::new(xobject_dict, Vec::new()))
}

fn form_dictionary(bbox: [f32; 4]) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Form".to_vec()));
    dict.set("FormType", Object::Integer(1));
    dict.set(
        "BBox",
        Object::Array(bbox.iter().map(|&v| Object::Real(v)).collect()),
    );
    dict
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Content bytes for a Form XObject
#[derive(Default)]
struct PageContent<'a> {
    data: Vec<u8>,
    /// Set when `data` is still encoded with this stream's filters
    encoded_by: Option<&'a Stream>,
}

/// Get the content stream data from a page.
///
/// A single stream lopdf cannot decode is kept encoded along with its
/// filters. Parts of a content array are concatenated, so each must decode.
fn get_page_content<'a>(
    doc: &'a Document,
    page_dict: &'a Dictionary,
) -> Result<PageContent<'a>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => doc.dereference(c)?.1,
        Err(_) => return Ok(PageContent::default()), // No content = blank page
    };

    match contents {
        Object::Stream(stream) => Ok(match decode_stream(stream) {
            Ok(data) => PageContent {
                data,
                encoded_by: None,
            },
            Err(err) => {
                log::warn!("Keeping content stream encoded: {}", err);
                PageContent {
                    data: stream.content.clone(),
                    encoded_by: Some(stream),
                }
            }
        }),
        Object::Array(arr) => Ok(PageContent {
            data: get_concatenated_content_streams(doc, arr)?,
            encoded_by: None,
        }),
        _ => Ok(PageContent::default()),
    }
}

/// Concatenate multiple content streams
fn get_concatenated_content_streams(doc: &Document, refs: &[Object]) -> Result<Vec<u8>> {
    let mut result = Vec::new();

    for obj in refs {
        if let Object::Stream(stream) = doc.dereference(obj)?.1 {
            result.extend_from_slice(&decode_stream(stream)?);
            result.push(b'\n');
        }
    }

    Ok(result)
}

fn decode_stream(stream: &Stream) -> lopdf::Result<Vec<u8>> {
    if stream.dict.get(b"Filter").is_err() {
        return Ok(stream.content.clone());
    }
    stream.decompressed_content()
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
///
/// The cache entry for a reference is claimed before its target is copied,
/// so reference cycles terminate. Page tree `Parent` links are dropped and
/// dangling references become null.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut CopyCache,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            let copied = match source.get_object(*id) {
                Ok(referenced) => copy_object_deep(output, source, referenced, cache)?,
                Err(err) => {
                    log::warn!("Dangling reference {:?} copied as null: {}", id, err);
                    Object::Null
                }
            };
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(copy_dictionary(
            output, source, dict, cache,
        )?)),
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => Ok(Object::Stream(Stream {
            dict: copy_dictionary(output, source, &stream.dict, cache)?,
            content: stream.content.clone(),
            allows_compression: stream.allows_compression,
            start_position: None,
        })),
        // Primitive types: just clone
        _ => Ok(obj.clone()),
    }
}

fn copy_dictionary(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    cache: &mut CopyCache,
) -> Result<Dictionary> {
    let mut new_dict = Dictionary::new();
    for (key, value) in dict.iter() {
        if key.as_slice() == b"Parent" {
            continue;
        }
        new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }
    Ok(new_dict)
}
