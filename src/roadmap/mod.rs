//! Study roadmaps: the data model and the flow that generates them.
//!
//! A [`RoadmapNode`] is one step of a learning plan. Every field is an opaque
//! string: identifiers are not checked for uniqueness and difficulty/time
//! labels are free text. A [`Roadmap`] is the ordered plan; order is the
//! suggested study sequence as returned. On the wire it is
//! `{"roadmap": [ ... ]}`.
//!
//! Doc comments on the fields below become schema descriptions and are sent
//! to the model. The two types carry none of their own.

pub mod flow;

pub use flow::{RoadmapFlow, ROADMAP_FLOW_NAME, ROADMAP_SYSTEM_INSTRUCTION};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ForgeError;
use crate::generation::OutputSchema;

/// "The Future of Renewable Energy", a multi-section policy document used as
/// demo input by the CLI.
pub const SAMPLE_DOCUMENT: &str = include_str!("renewable_energy.txt");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RoadmapNode {
    /// Unique identifier for the node
    pub node_id: String,
    /// Topic of the node
    pub topic: String,
    /// Description of the node
    pub description: String,
    /// Summary of the node
    pub summary: String,
    /// Difficulty of the node
    pub difficulty: String,
    /// Estimated time to complete the node
    pub estimated_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Roadmap {
    /// List of nodes in the roadmap
    #[serde(rename = "roadmap")]
    pub nodes: Vec<RoadmapNode>,
}

impl Roadmap {
    pub fn new(nodes: Vec<RoadmapNode>) -> Self {
        Self { nodes }
    }

    /// The output contract sent to the model and enforced on its reply.
    pub fn output_schema() -> Result<OutputSchema, ForgeError> {
        OutputSchema::for_type::<Self>()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RoadmapNode> {
        self.nodes.iter()
    }
}

impl IntoIterator for Roadmap {
    type Item = RoadmapNode;
    type IntoIter = std::vec::IntoIter<RoadmapNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Roadmap {
    type Item = &'a RoadmapNode;
    type IntoIter = std::slice::Iter<'a, RoadmapNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
