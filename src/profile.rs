//! The traffic/cta/cpf experiment profile.
//!
//! Declares the fixed three-node, three-link POWDER topology and assembles
//! it into a [`Request`]. The only tunable is the `phystype` parameter,
//! which selects the physical hardware type for all nodes uniformly.

use log::debug;

use crate::portal::{BoundParameters, Context, ParameterSpec, ParameterType, ParameterValue};
use crate::rspec::{Node, Request, RspecError, Tour};

pub const SITE_URN: &str = "urn:publicid:IDN+powder.utah.edu+authority+cm";
pub const UBUNTU18_IMG: &str =
    "urn:publicid:IDN+powder.utah.edu+image+powder-powder:ubuntu-18.04";
pub const DEFAULT_HWTYPE: &str = "m510";
pub const STORAGE_CAPACITY: &str = "128GB";
pub const STORAGE_MOUNTPOINT: &str = "/mnt/data";

pub const TOUR_DESCRIPTION: &str = "\nThis profile sets up a network experiment with three \
nodes: traffic, cta, and cpf. Each node runs Ubuntu 18 and is connected via specified NIC \
ports.\n";

pub const TOUR_INSTRUCTIONS: &str = "\nTo interact with the nodes, ssh into each node using \
the provided details in the experiment list view.\n";

/// Register the profile's parameters on the portal context.
pub fn define_parameters(context: &mut Context) -> Result<(), crate::portal::ParameterError> {
    context.define_parameter(ParameterSpec {
        name: "phystype".to_string(),
        description: "Optional physical node type".to_string(),
        long_description: Some(
            "Specify a physical node type (m510, m400, d710, etc) instead of letting the \
             resource mapper choose for you."
                .to_string(),
        ),
        parameter_type: ParameterType::String,
        default: ParameterValue::String(DEFAULT_HWTYPE.to_string()),
    })
}

/// Build a raw PC with the profile's image, storage volume, and hardware type.
fn create_node(name: &str, image: &str, storage: &str, hwtype: &str) -> Node {
    let mut node = Node::raw_pc(name);
    node.component_manager_id = Some(SITE_URN.to_string());
    node.disk_image = Some(image.to_string());
    node.hardware_type = Some(hwtype.to_string());
    node.add_blockstore(&format!("{name}-bs"), STORAGE_MOUNTPOINT, storage);
    node
}

/// Assemble the complete request: three nodes, three links, and the tour.
pub fn build_request(params: &BoundParameters) -> Result<Request, RspecError> {
    let phystype = params.get_str("phystype").unwrap_or(DEFAULT_HWTYPE);
    debug!("Building request with hardware type '{phystype}'");

    let mut request = Request::new();

    for name in ["traffic", "cta", "cpf"] {
        request.add_node(create_node(name, UBUNTU18_IMG, STORAGE_CAPACITY, phystype))?;
    }

    request.add_point_to_point("traffic-cta-link1", ("traffic", "eth2"), ("cta", "eth2"))?;
    request.add_point_to_point("traffic-cta-link2", ("traffic", "eth3"), ("cta", "eth3"))?;
    request.add_point_to_point("cta-cpf-link", ("cta", "eth1"), ("cpf", "eth3"))?;

    request.add_tour(Tour::markdown(TOUR_DESCRIPTION, TOUR_INSTRUCTIONS));

    Ok(request)
}

/// Compose the remote shell line that runs a setup script under sudo, with
/// all output redirected to the install log. Intended for node startup
/// services; not part of the emitted document.
pub fn install_script_command(script_dir: &str, filename: &str) -> String {
    format!("sudo bash {script_dir}{filename} &> ~/install_script_output")
}
