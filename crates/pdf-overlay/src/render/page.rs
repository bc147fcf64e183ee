//! Output page assembly
//!
//! A composed page draws its background layer untransformed and then its
//! foreground layer under the page's effective transform.

use crate::constants::{BACKGROUND_XOBJECT_NAME, FOREGROUND_XOBJECT_NAME};
use crate::geometry::Transform;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// A Form XObject placed with a transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub xobject_id: ObjectId,
    pub transform: Transform,
}

/// Add one composed page to `output` and return its object id.
///
/// The page takes the background's `media_box`; the foreground is drawn
/// after the background so it lands on top.
pub fn render_composed_page(
    output: &mut Document,
    parent_pages_id: ObjectId,
    media_box: [f32; 4],
    background: ObjectId,
    foreground: Layer,
) -> ObjectId {
    let mut xobjects = Dictionary::new();
    xobjects.set(BACKGROUND_XOBJECT_NAME, Object::Reference(background));
    xobjects.set(FOREGROUND_XOBJECT_NAME, Object::Reference(foreground.xobject_id));

    let content = [
        generate_placement_command(BACKGROUND_XOBJECT_NAME, Transform::IDENTITY),
        generate_placement_command(FOREGROUND_XOBJECT_NAME, foreground.transform),
    ]
    .concat();
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(media_box.iter().map(|&v| Object::Real(v)).collect()),
    );
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    output.add_object(page_dict)
}

/// Write the Pages node and Catalog for the collected pages
pub fn write_page_tree(output: &mut Document, pages_tree_id: ObjectId, page_ids: &[ObjectId]) {
    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
    let count = kids.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);
}

/// Generate the content stream command to place an XObject.
fn generate_placement_command(xobject_name: &str, transform: Transform) -> String {
    if transform.is_identity() {
        return format!("q /{} Do Q\n", xobject_name);
    }
    let [a, b, c, d, e, f] = transform.to_matrix();
    format!(
        "q {} {} {} {} {} {} cm /{} Do Q\n",
        a, b, c, d, e, f, xobject_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_placement_has_no_matrix() {
        assert_eq!(
            generate_placement_command("FG", Transform::IDENTITY),
            "q /FG Do Q\n"
        );
    }

    #[test]
    fn test_transformed_placement() {
        let cmd = generate_placement_command("FG", Transform::new(1.05, 0.0, -170.0));
        assert_eq!(cmd, "q 1.05 0 0 1.05 0 -170 cm /FG Do Q\n");
    }

    #[test]
    fn test_page_tree_counts_pages() {
        let mut output = Document::with_version("1.7");
        let pages_id = output.new_object_id();
        let bg = output.add_object(Dictionary::new());
        let fg = output.add_object(Dictionary::new());
        let page = render_composed_page(
            &mut output,
            pages_id,
            [0.0, 0.0, 612.0, 792.0],
            bg,
            Layer {
                xobject_id: fg,
                transform: Transform::IDENTITY,
            },
        );
        write_page_tree(&mut output, pages_id, &[page]);

        assert_eq!(output.get_pages().len(), 1);
    }
}
