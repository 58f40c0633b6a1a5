use serde::Deserialize;
use std::collections::BTreeMap;

pub const DEFAULT_BINARY: &str = "kn";
pub const DEFAULT_KUBECTL: &str = "kubectl";
pub const DEFAULT_NAMESPACE_FLAG: &str = "--namespace";
pub const DEFAULT_NAMESPACE_PREFIX: &str = "kne2etests";
pub const DEFAULT_TEST_IMAGE: &str = "gcr.io/knative-samples/helloworld-go";
pub const DEFAULT_SERVICE: &str = "hello";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct E2eConfig {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub kubectl: KubectlConfig,
    #[serde(default)]
    pub test: TestConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespacePlacement {
    /// Namespace flag goes after the subcommand arguments.
    #[default]
    Append,
    /// Namespace flag goes right after the fixed prefix arguments.
    Prefix,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_binary")]
    pub binary: String,
    #[serde(default)]
    pub prefix_args: Vec<String>,
    #[serde(default = "default_namespace_flag")]
    pub namespace_flag: String,
    #[serde(default)]
    pub namespace_placement: NamespacePlacement,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            prefix_args: Vec::new(),
            namespace_flag: default_namespace_flag(),
            namespace_placement: NamespacePlacement::default(),
            env: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct KubectlConfig {
    #[serde(default = "default_kubectl")]
    pub binary: String,
    #[serde(default)]
    pub prefix_args: Vec<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl Default for KubectlConfig {
    fn default() -> Self {
        Self {
            binary: default_kubectl(),
            prefix_args: Vec::new(),
            env: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestConfig {
    #[serde(default = "default_namespace_prefix")]
    pub namespace_prefix: String,
    /// Fixed namespace; when unset one is derived from `namespace_prefix`.
    pub namespace: Option<String>,
    #[serde(default = "default_image")]
    pub image: String,
    #[serde(default = "default_service")]
    pub service: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            namespace_prefix: default_namespace_prefix(),
            namespace: None,
            image: default_image(),
            service: default_service(),
        }
    }
}

fn default_binary() -> String {
    DEFAULT_BINARY.to_string()
}

fn default_kubectl() -> String {
    DEFAULT_KUBECTL.to_string()
}

fn default_namespace_flag() -> String {
    DEFAULT_NAMESPACE_FLAG.to_string()
}

fn default_namespace_prefix() -> String {
    DEFAULT_NAMESPACE_PREFIX.to_string()
}

fn default_image() -> String {
    DEFAULT_TEST_IMAGE.to_string()
}

fn default_service() -> String {
    DEFAULT_SERVICE.to_string()
}
