use crate::probe::ProbeKind;


/// One configured network check. Never changes after startup.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ProbeDefinition {
    kind: ProbeKind,
    target: String,
}


impl ProbeDefinition {
    pub fn new(kind: ProbeKind, target: String) -> ProbeDefinition {
        return ProbeDefinition {
            kind,
            target,
        };
    }

    pub fn get_kind(&self) -> ProbeKind {
        self.kind
    }

    pub fn get_target(&self) -> &str {
        &self.target
    }

    /// "<kind> <target>", e.g. "Ping 192.168.1.1"
    pub fn label(&self) -> String {
        format!("{} {}", self.kind.label(), self.target)
    }
}


/// Ordered list of probes, fixed for the lifetime of the program.
#[derive(Debug, Clone)]
pub struct ProbeRegistry {
    definitions: Vec<ProbeDefinition>,
}


impl ProbeRegistry {
    pub fn new(definitions: Vec<ProbeDefinition>) -> ProbeRegistry {
        return ProbeRegistry {
            definitions,
        };
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProbeDefinition> {
        self.definitions.iter()
    }

    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<&ProbeDefinition> {
        self.definitions.get(index)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }
}
