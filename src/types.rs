use serde::Serialize;

/// Which clients the binary builds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConnectMode {
    InCluster,
    External,
    Both,
}

impl ConnectMode {
    pub fn in_cluster(self) -> bool {
        matches!(self, ConnectMode::InCluster | ConnectMode::Both)
    }

    pub fn external(self) -> bool {
        matches!(self, ConnectMode::External | ConnectMode::Both)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
}

/// One listed object. Emitted as a single NDJSON line in JSON mode.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ResourceSummary {
    pub cluster: String,
    pub kind: String,
    pub namespace: String,
    pub name: String,
}
