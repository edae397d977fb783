//! GENI v3 request document serialization.
//!
//! The model in the parent module is flattened into serde structs that
//! mirror the wire schema, then rendered with quick-xml. Field order fixes
//! the attribute and element order, so output is deterministic.

use quick_xml::se::Serializer;
use quick_xml::SeError;
use serde::Serialize;

use super::{Blockstore, Link, Node, Request, Tour};

const RSPEC_NS: &str = "http://www.geni.net/resources/rspec/3";
const EMULAB_NS: &str = "http://www.protogeni.net/resources/rspec/ext/emulab/1";
const TOUR_NS: &str = "http://www.protogeni.net/resources/rspec/ext/apt-tour/1";
const SLIVER_TYPE_RAW_PC: &str = "raw-pc";

#[derive(Debug, Serialize)]
#[serde(rename = "rspec")]
struct XmlRspec {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "@xmlns:emulab")]
    xmlns_emulab: &'static str,
    #[serde(rename = "@type")]
    request_type: &'static str,
    #[serde(rename = "node")]
    nodes: Vec<XmlNode>,
    #[serde(rename = "link")]
    links: Vec<XmlLink>,
    #[serde(rename = "rspec_tour", skip_serializing_if = "Option::is_none")]
    tour: Option<XmlTour>,
}

#[derive(Debug, Serialize)]
struct XmlNode {
    #[serde(rename = "@client_id")]
    client_id: String,
    #[serde(rename = "@component_manager_id", skip_serializing_if = "Option::is_none")]
    component_manager_id: Option<String>,
    #[serde(rename = "@exclusive")]
    exclusive: bool,
    sliver_type: XmlSliverType,
    #[serde(skip_serializing_if = "Option::is_none")]
    hardware_type: Option<XmlHardwareType>,
    #[serde(rename = "interface")]
    interfaces: Vec<XmlInterface>,
    #[serde(rename = "emulab:blockstore")]
    blockstores: Vec<XmlBlockstore>,
}

#[derive(Debug, Serialize)]
struct XmlSliverType {
    #[serde(rename = "@name")]
    name: &'static str,
    #[serde(rename = "disk_image", skip_serializing_if = "Option::is_none")]
    disk_image: Option<XmlDiskImage>,
}

#[derive(Debug, Serialize)]
struct XmlDiskImage {
    #[serde(rename = "@name")]
    name: String,
}

#[derive(Debug, Serialize)]
struct XmlHardwareType {
    #[serde(rename = "@name")]
    name: String,
}

#[derive(Debug, Serialize)]
struct XmlInterface {
    #[serde(rename = "@client_id")]
    client_id: String,
}

#[derive(Debug, Serialize)]
struct XmlBlockstore {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@class")]
    class: &'static str,
    #[serde(rename = "@size")]
    size: String,
    #[serde(rename = "@mountpoint")]
    mountpoint: String,
    #[serde(rename = "@placement")]
    placement: &'static str,
}

#[derive(Debug, Serialize)]
struct XmlLink {
    #[serde(rename = "@client_id")]
    client_id: String,
    #[serde(rename = "interface_ref")]
    interface_refs: Vec<XmlInterfaceRef>,
}

#[derive(Debug, Serialize)]
struct XmlInterfaceRef {
    #[serde(rename = "@client_id")]
    client_id: String,
}

#[derive(Debug, Serialize)]
struct XmlTour {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    description: XmlTourSection,
    instructions: XmlTourSection,
}

#[derive(Debug, Serialize)]
struct XmlTourSection {
    #[serde(rename = "@type")]
    section_type: &'static str,
    #[serde(rename = "$text")]
    text: String,
}

impl From<&Node> for XmlNode {
    fn from(node: &Node) -> Self {
        XmlNode {
            client_id: node.client_id.clone(),
            component_manager_id: node.component_manager_id.clone(),
            exclusive: node.exclusive,
            sliver_type: XmlSliverType {
                name: SLIVER_TYPE_RAW_PC,
                disk_image: node
                    .disk_image
                    .as_ref()
                    .map(|name| XmlDiskImage { name: name.clone() }),
            },
            hardware_type: node
                .hardware_type
                .as_ref()
                .map(|name| XmlHardwareType { name: name.clone() }),
            interfaces: node
                .interfaces
                .iter()
                .map(|i| XmlInterface {
                    client_id: i.client_id.clone(),
                })
                .collect(),
            blockstores: node.blockstores.iter().map(XmlBlockstore::from).collect(),
        }
    }
}

impl From<&Blockstore> for XmlBlockstore {
    fn from(bs: &Blockstore) -> Self {
        XmlBlockstore {
            name: bs.name.clone(),
            class: "local",
            size: bs.size.clone(),
            mountpoint: bs.mountpoint.clone(),
            placement: "any",
        }
    }
}

impl From<&Link> for XmlLink {
    fn from(link: &Link) -> Self {
        XmlLink {
            client_id: link.client_id.clone(),
            interface_refs: link
                .interface_refs
                .iter()
                .map(|client_id| XmlInterfaceRef {
                    client_id: client_id.clone(),
                })
                .collect(),
        }
    }
}

impl From<&Tour> for XmlTour {
    fn from(tour: &Tour) -> Self {
        XmlTour {
            xmlns: TOUR_NS,
            description: XmlTourSection {
                section_type: "markdown",
                text: tour.description.clone(),
            },
            instructions: XmlTourSection {
                section_type: "markdown",
                text: tour.instructions.clone(),
            },
        }
    }
}

/// Render the request as an indented v3 XML document with declaration line.
pub(super) fn render(request: &Request) -> Result<String, super::RspecError> {
    let document = XmlRspec {
        xmlns: RSPEC_NS,
        xmlns_emulab: EMULAB_NS,
        request_type: "request",
        nodes: request.nodes().iter().map(XmlNode::from).collect(),
        links: request.links().iter().map(XmlLink::from).collect(),
        tour: request.tour().map(XmlTour::from),
    };

    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    write_document(&document, &mut out)?;
    out.push('\n');
    Ok(out)
}

fn write_document(document: &XmlRspec, out: &mut String) -> Result<(), SeError> {
    let mut serializer = Serializer::new(out);
    serializer.indent(' ', 2);
    document.serialize(serializer)?;
    Ok(())
}
