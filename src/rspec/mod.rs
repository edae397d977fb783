//! In-memory model of a GENI request RSpec.
//!
//! A [`Request`] owns the nodes, links, and tour text of an experiment
//! description. Structural invariants the portal schema would reject are
//! checked here as the model is assembled: node and link names are unique,
//! link endpoints sit on distinct existing nodes, and an interface backs at
//! most one link end. Serialization to the v3 XML document lives in
//! [`xml`].

pub mod xml;

/// Model assembly and serialization errors.
#[derive(Debug, thiserror::Error)]
pub enum RspecError {
    #[error("node name cannot be empty")]
    EmptyNodeName,
    #[error("duplicate node '{0}'")]
    DuplicateNode(String),
    #[error("duplicate link '{0}'")]
    DuplicateLink(String),
    #[error("link '{link}' references unknown node '{node}'")]
    UnknownNode { link: String, node: String },
    #[error("link '{link}' joins node '{node}' to itself")]
    SameNodeEndpoints { link: String, node: String },
    #[error("interface '{interface}' is already attached to a link")]
    InterfaceInUse { link: String, interface: String },
    #[error("failed to serialize RSpec document: {0}")]
    Serialize(#[from] quick_xml::SeError),
}

/// A named attachment point on a node.
///
/// The client id follows the portal convention `node:iface`, so interface
/// names stay unique across the request as long as they are unique per node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    pub client_id: String,
}

/// A block-storage volume attached to a node at a mount point.
#[derive(Debug, Clone)]
pub struct Blockstore {
    pub name: String,
    pub mountpoint: String,
    pub size: String,
}

/// A raw PC in the request: image, hardware type, interfaces, storage.
#[derive(Debug, Clone)]
pub struct Node {
    pub client_id: String,
    pub component_manager_id: Option<String>,
    pub disk_image: Option<String>,
    pub hardware_type: Option<String>,
    pub exclusive: bool,
    pub interfaces: Vec<Interface>,
    pub blockstores: Vec<Blockstore>,
}

impl Node {
    /// A dedicated physical machine (the portal's "raw PC" sliver type).
    pub fn raw_pc(client_id: &str) -> Self {
        Node {
            client_id: client_id.to_string(),
            component_manager_id: None,
            disk_image: None,
            hardware_type: None,
            exclusive: true,
            interfaces: Vec::new(),
            blockstores: Vec::new(),
        }
    }

    /// Attach a block-storage volume mounted at `mountpoint`.
    pub fn add_blockstore(&mut self, name: &str, mountpoint: &str, size: &str) {
        self.blockstores.push(Blockstore {
            name: name.to_string(),
            mountpoint: mountpoint.to_string(),
            size: size.to_string(),
        });
    }

    fn interface_id(&self, iface: &str) -> String {
        format!("{}:{}", self.client_id, iface)
    }

    /// Add the named interface if missing and return its client id.
    fn ensure_interface(&mut self, iface: &str) -> String {
        let client_id = self.interface_id(iface);
        if !self.interfaces.iter().any(|i| i.client_id == client_id) {
            self.interfaces.push(Interface {
                client_id: client_id.clone(),
            });
        }
        client_id
    }
}

/// A point-to-point link joining two node interfaces.
#[derive(Debug, Clone)]
pub struct Link {
    pub client_id: String,
    pub interface_refs: Vec<String>,
}

/// One end of a link: a node name and an interface name on that node.
pub type Endpoint<'a> = (&'a str, &'a str);

/// The aggregate request document under construction.
#[derive(Debug, Default)]
pub struct Request {
    nodes: Vec<Node>,
    links: Vec<Link>,
    tour: Option<Tour>,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn tour(&self) -> Option<&Tour> {
        self.tour.as_ref()
    }

    /// Add a fully constructed node. Node names must be unique.
    pub fn add_node(&mut self, node: Node) -> Result<(), RspecError> {
        if node.client_id.is_empty() {
            return Err(RspecError::EmptyNodeName);
        }
        if self.nodes.iter().any(|n| n.client_id == node.client_id) {
            return Err(RspecError::DuplicateNode(node.client_id));
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Create a link named `name` between two `(node, interface)` endpoints,
    /// creating the endpoint interfaces on their nodes.
    pub fn add_point_to_point(
        &mut self,
        name: &str,
        a: Endpoint<'_>,
        b: Endpoint<'_>,
    ) -> Result<(), RspecError> {
        if self.links.iter().any(|l| l.client_id == name) {
            return Err(RspecError::DuplicateLink(name.to_string()));
        }
        if a.0 == b.0 {
            return Err(RspecError::SameNodeEndpoints {
                link: name.to_string(),
                node: a.0.to_string(),
            });
        }

        // Validate both endpoints before touching either node.
        for (node_name, iface) in [a, b] {
            let node = self
                .nodes
                .iter()
                .find(|n| n.client_id == node_name)
                .ok_or_else(|| RspecError::UnknownNode {
                    link: name.to_string(),
                    node: node_name.to_string(),
                })?;
            let interface_id = node.interface_id(iface);
            if self
                .links
                .iter()
                .any(|l| l.interface_refs.contains(&interface_id))
            {
                return Err(RspecError::InterfaceInUse {
                    link: name.to_string(),
                    interface: interface_id,
                });
            }
        }

        let mut interface_refs = Vec::with_capacity(2);
        for (node_name, iface) in [a, b] {
            let node = self
                .nodes
                .iter_mut()
                .find(|n| n.client_id == node_name)
                .expect("endpoint node checked above");
            interface_refs.push(node.ensure_interface(iface));
        }

        self.links.push(Link {
            client_id: name.to_string(),
            interface_refs,
        });
        Ok(())
    }

    /// Attach the tour shown by the portal alongside the experiment.
    pub fn add_tour(&mut self, tour: Tour) {
        self.tour = Some(tour);
    }

    /// Render the request as a GENI v3 XML document. Deterministic: the same
    /// model always yields byte-identical output.
    pub fn to_xml(&self) -> Result<String, RspecError> {
        xml::render(self)
    }
}

/// Human-readable description and instructions bundled with the request.
#[derive(Debug, Clone)]
pub struct Tour {
    pub description: String,
    pub instructions: String,
}

impl Tour {
    /// Markdown description and instructions, shown verbatim by the portal.
    pub fn markdown(description: &str, instructions: &str) -> Self {
        Tour {
            description: description.to_string(),
            instructions: instructions.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_request() -> Request {
        let mut request = Request::new();
        request.add_node(Node::raw_pc("alpha")).unwrap();
        request.add_node(Node::raw_pc("beta")).unwrap();
        request
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut request = two_node_request();
        let err = request.add_node(Node::raw_pc("alpha")).unwrap_err();
        assert!(matches!(err, RspecError::DuplicateNode(name) if name == "alpha"));
    }

    #[test]
    fn test_empty_node_name_rejected() {
        let mut request = Request::new();
        assert!(matches!(
            request.add_node(Node::raw_pc("")),
            Err(RspecError::EmptyNodeName)
        ));
    }

    #[test]
    fn test_link_creates_endpoint_interfaces() {
        let mut request = two_node_request();
        request
            .add_point_to_point("alpha-beta", ("alpha", "eth1"), ("beta", "eth2"))
            .unwrap();

        assert_eq!(request.nodes()[0].interfaces[0].client_id, "alpha:eth1");
        assert_eq!(request.nodes()[1].interfaces[0].client_id, "beta:eth2");
        assert_eq!(
            request.links()[0].interface_refs,
            vec!["alpha:eth1".to_string(), "beta:eth2".to_string()]
        );
    }

    #[test]
    fn test_link_to_unknown_node_rejected() {
        let mut request = two_node_request();
        let err = request
            .add_point_to_point("bad", ("alpha", "eth1"), ("gamma", "eth1"))
            .unwrap_err();
        assert!(matches!(err, RspecError::UnknownNode { node, .. } if node == "gamma"));
    }

    #[test]
    fn test_self_link_rejected() {
        let mut request = two_node_request();
        let err = request
            .add_point_to_point("loop", ("alpha", "eth1"), ("alpha", "eth2"))
            .unwrap_err();
        assert!(matches!(err, RspecError::SameNodeEndpoints { .. }));
    }

    #[test]
    fn test_interface_reuse_rejected() {
        let mut request = two_node_request();
        request
            .add_point_to_point("first", ("alpha", "eth1"), ("beta", "eth1"))
            .unwrap();
        let err = request
            .add_point_to_point("second", ("alpha", "eth1"), ("beta", "eth2"))
            .unwrap_err();
        assert!(
            matches!(err, RspecError::InterfaceInUse { interface, .. } if interface == "alpha:eth1")
        );
    }

    #[test]
    fn test_duplicate_link_name_rejected() {
        let mut request = two_node_request();
        request
            .add_point_to_point("l1", ("alpha", "eth1"), ("beta", "eth1"))
            .unwrap();
        let err = request
            .add_point_to_point("l1", ("alpha", "eth2"), ("beta", "eth2"))
            .unwrap_err();
        assert!(matches!(err, RspecError::DuplicateLink(name) if name == "l1"));
    }
}
