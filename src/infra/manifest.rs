//! JSON description of a runtime's API surface.
//!
//! ```json
//! {
//!   "root": "tf",
//!   "members": {
//!     "__version__": { "kind": "constant", "value": "2.15.0" },
//!     "io": { "kind": "module", "members": {
//!       "gfile": { "kind": "module", "members": {
//!         "exists": { "kind": "function" }
//!       } }
//!     } }
//!   }
//! }
//! ```

use crate::domain::{ManifestError, Namespace, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

fn default_root() -> String {
    "tf".to_string()
}

/// One member of a manifest namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberSpec {
    Function,
    Class,
    Constant {
        value: String,
    },
    Module {
        #[serde(default)]
        members: BTreeMap<String, MemberSpec>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceManifest {
    #[serde(default = "default_root")]
    pub root: String,
    #[serde(default)]
    pub members: BTreeMap<String, MemberSpec>,
}

impl SurfaceManifest {
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn into_namespace(self) -> Namespace {
        build_namespace(self.root, self.members)
    }
}

fn build_namespace(path: String, members: BTreeMap<String, MemberSpec>) -> Namespace {
    let mut namespace = Namespace::new(path);
    for (name, member) in members {
        let symbol = match member {
            MemberSpec::Function => Symbol::Function(namespace.child_path(&name)),
            MemberSpec::Class => Symbol::Class(namespace.child_path(&name)),
            MemberSpec::Constant { value } => Symbol::Constant(value),
            MemberSpec::Module { members } => {
                Symbol::module(build_namespace(namespace.child_path(&name), members))
            }
        };
        namespace.insert(name, symbol);
    }
    namespace
}
