use serde::Deserialize;
use crate::probe::{ProbeDefinition, ProbeKind};


#[derive(Deserialize, Debug, Clone)]
pub struct Probe {
    kind: ProbeKind,
    target: String,
}


impl Probe {
    pub fn build_definition(&self) -> ProbeDefinition {
        return ProbeDefinition::new(self.kind, self.target.clone());
    }
}
