#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use mobicfg::config::load_and_validate;
use mobicfg::config::model::BuildConfig;
use mobicfg::errors::Result;

/// Descriptor used across tests; mirrors what a toolchain release ships.
pub const DESCRIPTOR: &str = r#"
compileSdkVersion = 34
minSdkVersion = 21
targetSdkVersion = 34
versionCode = 7
versionName = "1.4.2"
"#;

/// Builder for module documents, so each test only spells out the part it is
/// exercising. Setters take raw TOML value text (`"34"`,
/// `"\"toolchain.minSdkVersion\""`), which keeps symbolic references and bad
/// values equally easy to produce.
pub struct DocBuilder {
    plugins: Vec<String>,
    namespace: String,
    compile_sdk: String,
    ndk_version: Option<String>,
    compat_source: String,
    compat_target: String,
    jvm_target: Option<String>,
    application_id: String,
    min_sdk: String,
    target_sdk: String,
    version_code: String,
    version_name: String,
    abi_filters: Option<Vec<String>>,
    signing_sections: Vec<String>,
    signing_config: String,
    source: String,
}

impl DocBuilder {
    pub fn new() -> Self {
        Self {
            plugins: vec!["com.android.application".to_string()],
            namespace: "com.example.app".to_string(),
            compile_sdk: "34".to_string(),
            ndk_version: None,
            compat_source: "11".to_string(),
            compat_target: "11".to_string(),
            jvm_target: None,
            application_id: "com.example.app".to_string(),
            min_sdk: "21".to_string(),
            target_sdk: "34".to_string(),
            version_code: "1".to_string(),
            version_name: "1.0.0".to_string(),
            abi_filters: Some(vec!["arm64-v8a".to_string(), "x86_64".to_string()]),
            signing_sections: Vec::new(),
            signing_config: "debug".to_string(),
            source: "../..".to_string(),
        }
    }

    pub fn plugins(mut self, plugins: &[&str]) -> Self {
        self.plugins = plugins.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn namespace(mut self, v: &str) -> Self {
        self.namespace = v.to_string();
        self
    }

    pub fn compile_sdk(mut self, v: &str) -> Self {
        self.compile_sdk = v.to_string();
        self
    }

    pub fn ndk_version(mut self, v: &str) -> Self {
        self.ndk_version = Some(v.to_string());
        self
    }

    pub fn compat(mut self, source: &str, target: &str) -> Self {
        self.compat_source = source.to_string();
        self.compat_target = target.to_string();
        self
    }

    pub fn jvm_target(mut self, v: &str) -> Self {
        self.jvm_target = Some(v.to_string());
        self
    }

    pub fn application_id(mut self, v: &str) -> Self {
        self.application_id = v.to_string();
        self
    }

    pub fn min_sdk(mut self, v: &str) -> Self {
        self.min_sdk = v.to_string();
        self
    }

    pub fn target_sdk(mut self, v: &str) -> Self {
        self.target_sdk = v.to_string();
        self
    }

    pub fn version_code(mut self, v: &str) -> Self {
        self.version_code = v.to_string();
        self
    }

    pub fn version_name(mut self, v: &str) -> Self {
        self.version_name = v.to_string();
        self
    }

    pub fn abi_filters(mut self, abis: &[&str]) -> Self {
        self.abi_filters = Some(abis.iter().map(|a| a.to_string()).collect());
        self
    }

    pub fn no_abi_filters(mut self) -> Self {
        self.abi_filters = None;
        self
    }

    pub fn signing_section(mut self, name: &str, body: &str) -> Self {
        self.signing_sections
            .push(format!("\n[signingConfigs.{name}]\n{body}\n"));
        self
    }

    pub fn signing_config(mut self, alias: &str) -> Self {
        self.signing_config = alias.to_string();
        self
    }

    pub fn source(mut self, v: &str) -> Self {
        self.source = v.to_string();
        self
    }

    pub fn build(&self) -> String {
        let mut out = String::new();

        let plugins = self
            .plugins
            .iter()
            .map(|p| format!("\"{p}\""))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("plugins = [{plugins}]\n"));

        out.push_str("\n[module]\n");
        out.push_str(&format!("namespace = \"{}\"\n", self.namespace));
        out.push_str(&format!("compileSdk = {}\n", self.compile_sdk));
        if let Some(ref ndk) = self.ndk_version {
            out.push_str(&format!("ndkVersion = \"{ndk}\"\n"));
        }

        out.push_str("\n[compileOptions]\n");
        out.push_str(&format!("sourceCompatibility = \"{}\"\n", self.compat_source));
        out.push_str(&format!("targetCompatibility = \"{}\"\n", self.compat_target));
        if let Some(ref jvm) = self.jvm_target {
            out.push_str(&format!("jvmTarget = \"{jvm}\"\n"));
        }

        out.push_str("\n[defaultConfig]\n");
        out.push_str(&format!("applicationId = \"{}\"\n", self.application_id));
        out.push_str(&format!("minSdk = {}\n", self.min_sdk));
        out.push_str(&format!("targetSdk = {}\n", self.target_sdk));
        out.push_str(&format!("versionCode = {}\n", self.version_code));
        out.push_str(&format!("versionName = \"{}\"\n", self.version_name));
        if let Some(ref abis) = self.abi_filters {
            let abis = abis
                .iter()
                .map(|a| format!("\"{a}\""))
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!("abiFilters = [{abis}]\n"));
        }

        for section in &self.signing_sections {
            out.push_str(section);
        }

        out.push_str("\n[buildTypes.release]\n");
        out.push_str(&format!("signingConfig = \"{}\"\n", self.signing_config));

        out.push_str("\n[toolchain]\n");
        out.push_str(&format!("source = \"{}\"\n", self.source));

        out
    }
}

/// Lay out a toolchain-style project in a temp dir:
///
/// ```text
/// <root>/toolchain.toml          (when a descriptor is given)
/// <root>/android/app/Mobicfg.toml
/// ```
///
/// The document's default `source = "../.."` points back at `<root>`.
/// Returns the temp dir (keep it alive) and the document path.
pub fn write_project(doc: &str, descriptor: Option<&str>) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let app_dir = dir.path().join("android").join("app");
    fs::create_dir_all(&app_dir).expect("create module dir");

    if let Some(descriptor) = descriptor {
        fs::write(dir.path().join("toolchain.toml"), descriptor).expect("write descriptor");
    }

    let doc_path = app_dir.join("Mobicfg.toml");
    fs::write(&doc_path, doc).expect("write document");
    (dir, doc_path)
}

/// Write the project and run the full load pipeline.
pub fn load(doc: &str, descriptor: Option<&str>) -> Result<BuildConfig> {
    let (_dir, doc_path) = write_project(doc, descriptor);
    load_and_validate(&doc_path)
}
