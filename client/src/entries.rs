use web_sys::{Document, Element};

use wattmap_shared::{Entry, EntryError, EntryStore};

/// Container the page generator fills with one child element per plant,
/// each carrying `data-id`, `data-name`, `data-source`, `data-lat`,
/// `data-lon` and optionally `data-capacity`.
const DATA_CONTAINER_ID: &str = "plant-data";

/// Read the plant records embedded in the static markup.
///
/// The data container and its attributes are a hard page contract: any
/// missing piece fails the whole initialization, with no
/// partial-functionality mode.
pub fn read_entry_store(document: &Document) -> Result<EntryStore, String> {
    let container = document
        .get_element_by_id(DATA_CONTAINER_ID)
        .ok_or_else(|| format!("missing #{DATA_CONTAINER_ID} container"))?;

    let nodes = container.children();
    let mut entries = Vec::with_capacity(nodes.length() as usize);
    for index in 0..nodes.length() {
        let Some(node) = nodes.item(index) else {
            continue;
        };
        entries.push(entry_from_node(index as usize, &node).map_err(|err| err.to_string())?);
    }
    Ok(EntryStore::new(entries))
}

fn entry_from_node(index: usize, node: &Element) -> Result<Entry, EntryError> {
    Entry::from_attrs(
        index,
        node.get_attribute("data-id"),
        node.get_attribute("data-name"),
        node.get_attribute("data-source"),
        node.get_attribute("data-lat"),
        node.get_attribute("data-lon"),
        node.get_attribute("data-capacity"),
    )
}
