//! `.csproj` loading and editing.
//!
//! The project file is kept as an ordered XML tree. Only two things are ever
//! touched: the first `PropertyGroup` of the root `Project` element gains
//! (or updates) a `WindowsPackageType` field, and the Windows target framework
//! is looked up for the publish script.
//!
//! ```xml
//! <Project Sdk="Microsoft.NET.Sdk">
//!   <PropertyGroup>
//!     <TargetFrameworks Condition="$([MSBuild]::IsOSPlatform('windows'))">net8.0-windows10.0.19041.0;net8.0</TargetFrameworks>
//!     <WindowsPackageType>None</WindowsPackageType>
//!   </PropertyGroup>
//! </Project>
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use xmltree::{Element, EmitterConfig, XMLNode};

use crate::error::{Document, Error, Result};

/// Name of the root element of every project file.
pub const PROJECT_ELEMENT: &str = "Project";

/// Name of the group elements holding project properties.
pub const PROPERTY_GROUP: &str = "PropertyGroup";

/// Property controlling MSIX packaging of Windows builds.
pub const WINDOWS_PACKAGE_TYPE: &str = "WindowsPackageType";

/// `WindowsPackageType` value for an unpackaged app.
pub const UNPACKAGED: &str = "None";

/// Element listing the target frameworks for a platform.
pub const TARGET_FRAMEWORKS: &str = "TargetFrameworks";

/// `Condition` attribute value selecting the Windows target frameworks.
///
/// Matched literally, the expression is never evaluated.
pub const WINDOWS_CONDITION: &str = "$([MSBuild]::IsOSPlatform('windows'))";

const CONDITION_ATTR: &str = "Condition";

/// A parsed `.csproj` file.
#[derive(Debug, Clone)]
pub struct ProjectFile {
    path: PathBuf,
    root: Element,
}

impl ProjectFile {
    /// Loads and parses the project file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the file does not exist, and a parse or
    /// format error when it is not a `<Project>` XML document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(path, &content)
    }

    /// Parses project file content that was read from `path`.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self> {
        let root = Element::parse(content.as_bytes())?;
        if root.name != PROJECT_ELEMENT {
            return Err(Error::Format(Document::Project));
        }
        Ok(Self {
            path: path.into(),
            root,
        })
    }

    /// Path the project was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the project file.
    pub fn dir(&self) -> &Path {
        project_dir(&self.path)
    }

    /// The root `Project` element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Switches the project to an unpackaged Windows build.
    pub fn make_unpackaged(&mut self) {
        self.set_property(WINDOWS_PACKAGE_TYPE, UNPACKAGED);
    }

    /// Sets `name` to `value` in the first `PropertyGroup`.
    ///
    /// The group is appended to the root when the project has none. An
    /// existing field has all of its content replaced by `value`, otherwise a
    /// new field is appended to the group.
    pub fn set_property(&mut self, name: &str, value: &str) {
        let index = self.property_group_index();
        if let XMLNode::Element(group) = &mut self.root.children[index] {
            set_field(group, name, value);
        }
    }

    /// Reads `name` from the first `PropertyGroup`.
    pub fn property(&self, name: &str) -> Option<String> {
        self.root
            .get_child(PROPERTY_GROUP)?
            .get_child(name)?
            .get_text()
            .map(|text| text.into_owned())
    }

    /// Number of `PropertyGroup` children of the root.
    pub fn property_group_count(&self) -> usize {
        child_elements(&self.root)
            .filter(|e| e.name == PROPERTY_GROUP)
            .count()
    }

    fn property_group_index(&mut self) -> usize {
        let found = self
            .root
            .children
            .iter()
            .position(|node| matches!(node, XMLNode::Element(e) if e.name == PROPERTY_GROUP));

        match found {
            Some(index) => index,
            None => {
                debug!("no {PROPERTY_GROUP} in {}, appending one", self.path.display());
                self.root
                    .children
                    .push(XMLNode::Element(Element::new(PROPERTY_GROUP)));
                self.root.children.len() - 1
            }
        }
    }

    /// Finds the Windows-conditioned `TargetFrameworks` list.
    ///
    /// The first element in document order whose `Condition` is exactly
    /// [`WINDOWS_CONDITION`] wins.
    pub fn target_frameworks(&self) -> Option<TargetFrameworkList> {
        let element = find_element(&self.root, &|e| {
            e.name == TARGET_FRAMEWORKS
                && e.attributes.get(CONDITION_ATTR).map(String::as_str) == Some(WINDOWS_CONDITION)
        })?;
        Some(TargetFrameworkList::new(text_of(element)))
    }

    /// The Windows target framework token, e.g. `net8.0-windows10.0.19041.0`.
    pub fn windows_target_framework(&self) -> Option<String> {
        let list = self.target_frameworks()?;
        list.windows().map(str::to_string)
    }

    /// Serializes the whole document.
    pub fn to_xml_string(&self) -> Result<String> {
        let config = EmitterConfig::new()
            .perform_indent(true)
            .indent_string("  ")
            .write_document_declaration(false);

        let mut buf = Vec::new();
        self.root.write_with_config(&mut buf, config)?;
        let mut xml = String::from_utf8_lossy(&buf).into_owned();
        xml.push('\n');
        Ok(xml)
    }

    /// Overwrites the project file with the current document.
    pub fn save(&self) -> Result<()> {
        let xml = self.to_xml_string()?;
        fs::write(&self.path, xml).map_err(|e| Error::io(&self.path, e))?;
        info!("saved {}", self.path.display());
        Ok(())
    }
}

/// The `;`-separated value of a `TargetFrameworks` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFrameworkList(String);

impl TargetFrameworkList {
    /// Wraps a raw `TargetFrameworks` value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Individual tokens, untrimmed.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.split(';')
    }

    /// First `net*` token targeting Windows.
    pub fn windows(&self) -> Option<&str> {
        self.iter()
            .find(|tf| tf.starts_with("net") && tf.contains("-windows"))
    }
}

/// Directory of a project path; empty for a bare file name.
pub(crate) fn project_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}

fn child_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(|node| match node {
        XMLNode::Element(e) => Some(e),
        _ => None,
    })
}

fn find_element<'a>(element: &'a Element, pred: &dyn Fn(&Element) -> bool) -> Option<&'a Element> {
    if pred(element) {
        return Some(element);
    }
    child_elements(element).find_map(|child| find_element(child, pred))
}

/// Concatenated text of an element and its descendants.
fn text_of(element: &Element) -> String {
    let mut text = String::new();
    collect_text(element, &mut text);
    text
}

fn collect_text(element: &Element, out: &mut String) {
    for node in &element.children {
        match node {
            XMLNode::Text(s) | XMLNode::CData(s) => out.push_str(s),
            XMLNode::Element(e) => collect_text(e, out),
            _ => {}
        }
    }
}

fn set_field(group: &mut Element, name: &str, value: &str) {
    match group.get_mut_child(name) {
        Some(field) => {
            field.children = vec![XMLNode::Text(value.to_string())];
        }
        None => {
            let mut field = Element::new(name);
            field.children.push(XMLNode::Text(value.to_string()));
            group.children.push(XMLNode::Element(field));
        }
    }
}
