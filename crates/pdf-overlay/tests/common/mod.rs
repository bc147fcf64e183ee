#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

pub const LETTER: (i64, i64) = (612, 792);

/// Build a document whose page `i` has the given size and the content
/// marker `{tag}-{i}`
pub fn create_test_pdf_sized(sizes: &[(i64, i64)], tag: &str) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    // Create pages array
    let mut kids = Vec::new();
    for (i, &(width, height)) in sizes.iter().enumerate() {
        let content = format!("0 0 m 10 10 l S % {}-{}\n", tag, i);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(width),
                    Object::Integer(height),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    // Create pages dict
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(sizes.len() as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    // Create catalog
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

pub fn create_test_pdf(num_pages: usize, tag: &str) -> Document {
    create_test_pdf_sized(&vec![LETTER; num_pages], tag)
}

pub fn to_bytes(mut doc: Document) -> Vec<u8> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    writer
}

pub fn test_pdf_bytes(num_pages: usize, tag: &str) -> Vec<u8> {
    to_bytes(create_test_pdf(num_pages, tag))
}

/// Output page ids in page order
pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

fn stream_text(stream: &Stream) -> String {
    let bytes = if stream.dict.get(b"Filter").is_ok() {
        stream.decompressed_content().unwrap()
    } else {
        stream.content.clone()
    };
    String::from_utf8_lossy(&bytes).into_owned()
}

/// The page's own content stream
pub fn page_content(doc: &Document, page_id: ObjectId) -> String {
    let page = doc.get_dictionary(page_id).unwrap();
    let content_id = page.get(b"Contents").unwrap().as_reference().unwrap();
    stream_text(doc.get_object(content_id).unwrap().as_stream().unwrap())
}

/// The XObject registered under `name` in the page's resources
pub fn page_xobject(doc: &Document, page_id: ObjectId, name: &str) -> (ObjectId, Stream) {
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    let id = xobjects
        .get(name.as_bytes())
        .unwrap()
        .as_reference()
        .unwrap();
    let stream = doc.get_object(id).unwrap().as_stream().unwrap().clone();
    (id, stream)
}

pub fn xobject_content(doc: &Document, page_id: ObjectId, name: &str) -> String {
    stream_text(&page_xobject(doc, page_id, name).1)
}

pub fn number(obj: &Object) -> f32 {
    match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        other => panic!("not a number: {:?}", other),
    }
}

pub fn numbers(obj: &Object) -> Vec<f32> {
    obj.as_array().unwrap().iter().map(number).collect()
}

pub fn xobject_bbox(doc: &Document, page_id: ObjectId, name: &str) -> Vec<f32> {
    let (_, stream) = page_xobject(doc, page_id, name);
    numbers(stream.dict.get(b"BBox").unwrap())
}

pub fn page_media_box(doc: &Document, page_id: ObjectId) -> Vec<f32> {
    let page = doc.get_dictionary(page_id).unwrap();
    numbers(page.get(b"MediaBox").unwrap())
}

/// The `cm` operands used to place XObject `name`, or `None` when it is
/// drawn without a matrix
pub fn placement_matrix(content: &str, name: &str) -> Option<[f32; 6]> {
    let needle = format!("/{} Do", name);
    let line = content
        .lines()
        .find(|line| line.contains(&needle))
        .unwrap_or_else(|| panic!("no placement of {} in {:?}", name, content));
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let cm = tokens.iter().position(|&t| t == "cm")?;
    let mut matrix = [0.0f32; 6];
    for (slot, token) in matrix.iter_mut().zip(&tokens[cm - 6..cm]) {
        *slot = token.parse().unwrap();
    }
    Some(matrix)
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}
