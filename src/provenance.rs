//! Provenance records attached to feature collections
//!
//! Records which workflow produced a collection and which artifacts link back
//! to it. Each object carries its own `type` member so nested records (an
//! `Artifact` inside an `ArtifactCollection`, a `Workflow` inside a
//! `WorkflowCollection`) stay self-describing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scalar value of a provenance property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProvenanceValue {
    String(String),
    Number(serde_json::Number),
}

pub type ProvenanceProperties = BTreeMap<String, ProvenanceValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArtifactType {
    #[default]
    Artifact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArtifactCollectionType {
    #[default]
    ArtifactCollection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WorkflowType {
    #[default]
    Workflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WorkflowProvenanceType {
    #[default]
    WorkflowProvenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WorkflowCollectionType {
    #[default]
    WorkflowCollection,
}

/// One id or several
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MicroJsonIds {
    One(String),
    Many(Vec<String>),
}

impl MicroJsonIds {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let ids: &[String] = match self {
            MicroJsonIds::One(id) => std::slice::from_ref(id),
            MicroJsonIds::Many(ids) => ids.as_slice(),
        };
        ids.iter().map(String::as_str)
    }
}

/// Link from an artifact to MicroJSON objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroJsonLink {
    #[serde(rename = "microjsonId")]
    pub microjson_id: MicroJsonIds,
    #[serde(rename = "microjsonField", default, skip_serializing_if = "Option::is_none")]
    pub microjson_field: Option<String>,
}

/// A single file or directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(rename = "type")]
    pub kind: ArtifactType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ProvenanceProperties>,
    #[serde(rename = "microjsonLinks")]
    pub microjson_links: Vec<MicroJsonLink>,
}

impl Artifact {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            kind: ArtifactType::Artifact,
            id: None,
            uri: uri.into(),
            properties: None,
            microjson_links: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactCollection {
    #[serde(rename = "type")]
    pub kind: ArtifactCollectionType,
    pub artifacts: Vec<Artifact>,
}

/// Output of a workflow run: a single artifact or a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputArtifacts {
    Artifact(Artifact),
    Collection(ArtifactCollection),
}

/// One execution of a workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowProvenance {
    #[serde(rename = "type")]
    pub kind: WorkflowProvenanceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ProvenanceProperties>,
    #[serde(rename = "outputArtifacts", default, skip_serializing_if = "Option::is_none")]
    pub output_artifacts: Option<OutputArtifacts>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(rename = "type")]
    pub kind: WorkflowType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ProvenanceProperties>,
    #[serde(rename = "subWorkflows", default, skip_serializing_if = "Option::is_none")]
    pub sub_workflows: Option<Vec<Workflow>>,
    #[serde(rename = "workflowProvenance", default, skip_serializing_if = "Option::is_none")]
    pub workflow_provenance: Option<WorkflowProvenance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowCollection {
    #[serde(rename = "type")]
    pub kind: WorkflowCollectionType,
    pub workflows: Vec<Workflow>,
}

/// Any provenance record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Provenance {
    Workflow(Workflow),
    WorkflowCollection(WorkflowCollection),
    Artifact(Artifact),
    ArtifactCollection(ArtifactCollection),
}

impl Provenance {
    /// Every artifact reachable from this record
    pub fn artifacts(&self) -> Vec<&Artifact> {
        let mut out = Vec::new();
        match self {
            Provenance::Artifact(a) => out.push(a),
            Provenance::ArtifactCollection(c) => out.extend(c.artifacts.iter()),
            Provenance::Workflow(w) => collect_workflow_artifacts(w, &mut out),
            Provenance::WorkflowCollection(c) => {
                for w in &c.workflows {
                    collect_workflow_artifacts(w, &mut out);
                }
            }
        }
        out
    }
}

fn collect_workflow_artifacts<'a>(workflow: &'a Workflow, out: &mut Vec<&'a Artifact>) {
    if let Some(output) = workflow
        .workflow_provenance
        .as_ref()
        .and_then(|p| p.output_artifacts.as_ref())
    {
        match output {
            OutputArtifacts::Artifact(a) => out.push(a),
            OutputArtifacts::Collection(c) => out.extend(c.artifacts.iter()),
        }
    }
    for sub in workflow.sub_workflows.iter().flatten() {
        collect_workflow_artifacts(sub, out);
    }
}
