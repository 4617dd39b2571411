use crate::error::{Error, Result};
use crate::ir::{Document, Node};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct TreeDump<'a> {
    pub width: u32,
    pub height: u32,
    pub node_count: usize,
    pub gradients: Vec<&'a str>,
    pub references: Vec<ReferenceDump<'a>>,
    pub root: &'a Node,
}

#[derive(Debug, Serialize)]
pub struct ReferenceDump<'a> {
    pub attribute: &'a str,
    pub gradient: &'a str,
    pub resolved: bool,
}

impl<'a> TreeDump<'a> {
    pub fn from_document(doc: &'a Document) -> Self {
        let gradients = doc.gradient_ids();
        let references = doc
            .gradient_references()
            .into_iter()
            .map(|(attribute, gradient)| ReferenceDump {
                attribute,
                gradient,
                resolved: gradients.contains(&gradient),
            })
            .collect();

        TreeDump {
            width: doc.width,
            height: doc.height,
            node_count: doc.nodes().len(),
            gradients,
            references,
            root: &doc.root,
        }
    }
}

/// Writes the drawing tree as pretty JSON, for inspecting a build without
/// reading the SVG.
pub fn write_tree_dump(path: &Path, doc: &Document) -> Result<()> {
    let file = File::create(path).map_err(|err| Error::io(path, err))?;
    let mut writer = BufWriter::new(file);
    let dump = TreeDump::from_document(doc);
    serde_json::to_writer_pretty(&mut writer, &dump)
        .map_err(|err| Error::io(path, std::io::Error::other(err)))?;
    writer.flush().map_err(|err| Error::io(path, err))?;
    Ok(())
}
