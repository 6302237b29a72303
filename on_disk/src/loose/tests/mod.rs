use std::fs;

use gitlet_core::{hasher, object::Id, zlib};

use crate::Locator;


// Store `encoded` (header and payload, or anything else) as a loose object
// without going through `write_object`, so tests can plant objects that
// `write_object` would never produce.
fn plant(r: &Locator, encoded: &[u8]) -> Id {
    let id = hasher::hash(encoded);
    plant_compressed(r, &id, &zlib::compress_into(encoded, encoded.len() * 2 + 512).unwrap());
    id
}

fn plant_compressed(r: &Locator, id: &Id, compressed: &[u8]) {
    let path = r.object_path(id);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, compressed).unwrap();
}
