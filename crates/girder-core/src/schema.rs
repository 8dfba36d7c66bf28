//! Declarative schema rules for the MSBuild project-file language.
//!
//! Validation is entirely data-driven: every element kind maps to an
//! [`ElementRule`] describing its allowed attributes and children, and the
//! single generic validator in `girder-parser` interprets those records. No
//! element kind has its own validation code.
//!
//! Task elements are the exception to the kind-keyed lookup: the attributes a
//! `<Copy>` or `<Csc>` element accepts depend on the task name, so the
//! catalog carries a second, name-keyed table (see [`crate::tasks`]) with a
//! permissive fallback for tasks it has never heard of.

use std::fmt;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::tasks;

/// The structural category of a markup element.
///
/// The kind selects the [`ElementRule`] an element is validated against. Task
/// elements all share [`ElementKind::Task`] and are further refined by task
/// name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Project,
    PropertyGroup,
    Property,
    ItemGroup,
    Item,
    ItemMetadata,
    ItemDefinitionGroup,
    ItemDefinition,
    Target,
    Task,
    Output,
    UsingTask,
    ParameterGroup,
    Parameter,
    TaskBody,
    Import,
    ImportGroup,
    Choose,
    When,
    Otherwise,
    OnError,
    ProjectExtensions,
    Sdk,
}

impl ElementKind {
    /// The canonical tag name for this kind.
    ///
    /// Kinds reached through a fallback rule (properties, items, metadata,
    /// tasks, parameters) match any tag name; the canonical name is only
    /// used for display and for matching explicit child rules.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Project => "Project",
            ElementKind::PropertyGroup => "PropertyGroup",
            ElementKind::Property => "Property",
            ElementKind::ItemGroup => "ItemGroup",
            ElementKind::Item => "Item",
            ElementKind::ItemMetadata => "ItemMetadata",
            ElementKind::ItemDefinitionGroup => "ItemDefinitionGroup",
            ElementKind::ItemDefinition => "ItemDefinition",
            ElementKind::Target => "Target",
            ElementKind::Task => "Task",
            ElementKind::Output => "Output",
            ElementKind::UsingTask => "UsingTask",
            ElementKind::ParameterGroup => "ParameterGroup",
            ElementKind::Parameter => "Parameter",
            ElementKind::TaskBody => "TaskBody",
            ElementKind::Import => "Import",
            ElementKind::ImportGroup => "ImportGroup",
            ElementKind::Choose => "Choose",
            ElementKind::When => "When",
            ElementKind::Otherwise => "Otherwise",
            ElementKind::OnError => "OnError",
            ElementKind::ProjectExtensions => "ProjectExtensions",
            ElementKind::Sdk => "Sdk",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rule for a single attribute of an element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeRule {
    name: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    required_unless: Option<String>,
    #[serde(default)]
    exclusive_with: Option<String>,
}

impl AttributeRule {
    /// An optional attribute with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            required_unless: None,
            exclusive_with: None,
        }
    }

    /// Mark the attribute as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the attribute as required unless `other` is present instead.
    pub fn required_unless(mut self, other: impl Into<String>) -> Self {
        self.required_unless = Some(other.into());
        self
    }

    /// Forbid the attribute when `other` is also present.
    pub fn exclusive_with(mut self, other: impl Into<String>) -> Self {
        self.exclusive_with = Some(other.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this rule matches an attribute name (case-insensitive).
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The alternate attribute whose presence lifts the requirement.
    pub fn required_unless_present(&self) -> Option<&str> {
        self.required_unless.as_deref()
    }

    /// The attribute this one cannot be combined with.
    pub fn exclusive_with_name(&self) -> Option<&str> {
        self.exclusive_with.as_deref()
    }
}

/// Rule for a kind of child element.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChildRule {
    kind: ElementKind,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    at_most_one: bool,
    #[serde(default)]
    must_be_last: bool,
}

impl ChildRule {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            required: false,
            at_most_one: false,
            must_be_last: false,
        }
    }

    /// At least one child of this kind must be present.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// At most one child of this kind may be present.
    pub fn at_most_one(mut self) -> Self {
        self.at_most_one = true;
        self
    }

    /// A child of this kind must be the last child element.
    pub fn must_be_last(mut self) -> Self {
        self.must_be_last = true;
        self
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Whether this rule matches a child tag name (case-insensitive).
    pub fn matches(&self, name: &str) -> bool {
        self.kind.name().eq_ignore_ascii_case(name)
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_at_most_one(&self) -> bool {
        self.at_most_one
    }

    pub fn is_must_be_last(&self) -> bool {
        self.must_be_last
    }
}

/// The complete rule record for one element kind (or one task name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementRule {
    name: String,
    #[serde(default)]
    attributes: Vec<AttributeRule>,
    #[serde(default)]
    allow_any_attribute: bool,
    #[serde(default)]
    children: Vec<ChildRule>,
    #[serde(default)]
    fallback_child: Option<ElementKind>,
    #[serde(default)]
    allows_text: bool,
    #[serde(default)]
    skip_child_validation: bool,
}

impl ElementRule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            allow_any_attribute: false,
            children: Vec::new(),
            fallback_child: None,
            allows_text: false,
            skip_child_validation: false,
        }
    }

    pub fn attribute(mut self, rule: AttributeRule) -> Self {
        self.attributes.push(rule);
        self
    }

    /// Accept attributes beyond the declared ones without diagnostics.
    pub fn allow_any_attribute(mut self) -> Self {
        self.allow_any_attribute = true;
        self
    }

    pub fn child(mut self, rule: ChildRule) -> Self {
        self.children.push(rule);
        self
    }

    /// Kind to validate child elements against when no child rule matches.
    pub fn fallback_child(mut self, kind: ElementKind) -> Self {
        self.fallback_child = Some(kind);
        self
    }

    /// Permit non-whitespace text content (parsed as a value expression).
    pub fn allows_text(mut self) -> Self {
        self.allows_text = true;
        self
    }

    /// Skip content validation entirely (free-form elements).
    pub fn skip_child_validation(mut self) -> Self {
        self.skip_child_validation = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[AttributeRule] {
        &self.attributes
    }

    /// Find the attribute rule matching `name`, case-insensitively.
    pub fn find_attribute(&self, name: &str) -> Option<&AttributeRule> {
        self.attributes.iter().find(|rule| rule.matches(name))
    }

    pub fn allows_any_attribute(&self) -> bool {
        self.allow_any_attribute
    }

    pub fn children(&self) -> &[ChildRule] {
        &self.children
    }

    pub fn fallback_child_kind(&self) -> Option<ElementKind> {
        self.fallback_child
    }

    pub fn allows_text_content(&self) -> bool {
        self.allows_text
    }

    pub fn skips_child_validation(&self) -> bool {
        self.skip_child_validation
    }
}

/// The rule lookup the validator runs against.
///
/// Holds one rule per [`ElementKind`] plus the name-keyed task table. The
/// catalog is immutable during validation; user-supplied task schemas are
/// registered up front via [`SchemaCatalog::add_task`].
#[derive(Debug)]
pub struct SchemaCatalog {
    rules: IndexMap<ElementKind, ElementRule>,
    task_rules: IndexMap<String, ElementRule>,
    unknown_task: ElementRule,
}

impl SchemaCatalog {
    /// The built-in catalog: every structural element of the language plus
    /// the built-in task table.
    pub fn builtin() -> Self {
        let mut catalog = Self {
            rules: builtin_element_rules(),
            task_rules: IndexMap::new(),
            unknown_task: task_shell("unknown task").allow_any_attribute(),
        };
        for rule in tasks::builtin_tasks() {
            catalog.add_task(rule);
        }
        debug!(
            elements = catalog.rules.len(),
            tasks = catalog.task_rules.len();
            "Built schema catalog"
        );
        catalog
    }

    /// Register (or replace) a task rule, keyed by its name.
    pub fn add_task(&mut self, rule: ElementRule) {
        self.task_rules
            .insert(rule.name().to_ascii_lowercase(), rule);
    }

    /// The rule for a structural element kind.
    pub fn rule(&self, kind: ElementKind) -> Option<&ElementRule> {
        self.rules.get(&kind)
    }

    /// The rule for a task, by name (case-insensitive).
    ///
    /// Unknown task names resolve to a permissive rule that accepts any
    /// attribute, so third-party tasks never produce attribute noise.
    pub fn task_rule(&self, name: &str) -> &ElementRule {
        self.task_rules
            .get(&name.to_ascii_lowercase())
            .unwrap_or(&self.unknown_task)
    }

    /// Whether a task with this exact name is known.
    pub fn knows_task(&self, name: &str) -> bool {
        self.task_rules.contains_key(&name.to_ascii_lowercase())
    }

    /// Number of registered task rules.
    pub fn task_count(&self) -> usize {
        self.task_rules.len()
    }
}

/// The child rules and common attributes every task element shares.
pub(crate) fn task_shell(name: impl Into<String>) -> ElementRule {
    ElementRule::new(name)
        .attribute(AttributeRule::new("Condition"))
        .attribute(AttributeRule::new("ContinueOnError"))
        .attribute(AttributeRule::new("MSBuildRuntime"))
        .attribute(AttributeRule::new("MSBuildArchitecture"))
        .child(ChildRule::new(ElementKind::Output))
}

fn condition() -> AttributeRule {
    AttributeRule::new("Condition")
}

fn builtin_element_rules() -> IndexMap<ElementKind, ElementRule> {
    let mut rules = IndexMap::new();

    rules.insert(
        ElementKind::Project,
        ElementRule::new("Project")
            .attribute(AttributeRule::new("xmlns").required())
            .attribute(AttributeRule::new("DefaultTargets"))
            .attribute(AttributeRule::new("InitialTargets"))
            .attribute(AttributeRule::new("ToolsVersion"))
            .attribute(AttributeRule::new("TreatAsLocalProperty"))
            .attribute(AttributeRule::new("Sdk"))
            .child(ChildRule::new(ElementKind::PropertyGroup))
            .child(ChildRule::new(ElementKind::ItemGroup))
            .child(ChildRule::new(ElementKind::ItemDefinitionGroup))
            .child(ChildRule::new(ElementKind::Choose))
            .child(ChildRule::new(ElementKind::Import))
            .child(ChildRule::new(ElementKind::ImportGroup))
            .child(ChildRule::new(ElementKind::ProjectExtensions).at_most_one())
            .child(ChildRule::new(ElementKind::Sdk))
            .child(ChildRule::new(ElementKind::Target))
            .child(ChildRule::new(ElementKind::UsingTask)),
    );

    rules.insert(
        ElementKind::PropertyGroup,
        ElementRule::new("PropertyGroup")
            .attribute(condition())
            .attribute(AttributeRule::new("Label"))
            .fallback_child(ElementKind::Property),
    );

    rules.insert(
        ElementKind::Property,
        ElementRule::new("Property").attribute(condition()).allows_text(),
    );

    rules.insert(
        ElementKind::ItemGroup,
        ElementRule::new("ItemGroup")
            .attribute(condition())
            .attribute(AttributeRule::new("Label"))
            .fallback_child(ElementKind::Item),
    );

    rules.insert(
        ElementKind::Item,
        ElementRule::new("Item")
            .attribute(AttributeRule::new("Include").required_unless("Remove"))
            .attribute(AttributeRule::new("Exclude"))
            .attribute(AttributeRule::new("Remove"))
            .attribute(AttributeRule::new("Update"))
            .attribute(condition())
            .attribute(AttributeRule::new("KeepMetadata"))
            .attribute(AttributeRule::new("RemoveMetadata"))
            .attribute(AttributeRule::new("KeepDuplicates"))
            .fallback_child(ElementKind::ItemMetadata),
    );

    rules.insert(
        ElementKind::ItemMetadata,
        ElementRule::new("ItemMetadata").attribute(condition()).allows_text(),
    );

    rules.insert(
        ElementKind::ItemDefinitionGroup,
        ElementRule::new("ItemDefinitionGroup")
            .attribute(condition())
            .fallback_child(ElementKind::ItemDefinition),
    );

    rules.insert(
        ElementKind::ItemDefinition,
        ElementRule::new("ItemDefinition")
            .attribute(condition())
            .fallback_child(ElementKind::ItemMetadata),
    );

    rules.insert(
        ElementKind::Target,
        ElementRule::new("Target")
            .attribute(AttributeRule::new("Name").required())
            .attribute(condition())
            .attribute(AttributeRule::new("DependsOnTargets"))
            .attribute(AttributeRule::new("Inputs"))
            .attribute(AttributeRule::new("Outputs"))
            .attribute(AttributeRule::new("Returns"))
            .attribute(AttributeRule::new("KeepDuplicateOutputs"))
            .attribute(AttributeRule::new("BeforeTargets"))
            .attribute(AttributeRule::new("AfterTargets"))
            .attribute(AttributeRule::new("Label"))
            .child(ChildRule::new(ElementKind::PropertyGroup))
            .child(ChildRule::new(ElementKind::ItemGroup))
            .child(ChildRule::new(ElementKind::OnError).must_be_last())
            .fallback_child(ElementKind::Task),
    );

    rules.insert(ElementKind::Task, task_shell("Task"));

    rules.insert(
        ElementKind::Output,
        ElementRule::new("Output")
            .attribute(AttributeRule::new("TaskParameter").required())
            .attribute(
                AttributeRule::new("PropertyName")
                    .required_unless("ItemName")
                    .exclusive_with("ItemName"),
            )
            .attribute(
                AttributeRule::new("ItemName")
                    .required_unless("PropertyName")
                    .exclusive_with("PropertyName"),
            )
            .attribute(condition()),
    );

    rules.insert(
        ElementKind::UsingTask,
        ElementRule::new("UsingTask")
            .attribute(AttributeRule::new("TaskName").required())
            .attribute(
                AttributeRule::new("AssemblyName")
                    .required_unless("AssemblyFile")
                    .exclusive_with("AssemblyFile"),
            )
            .attribute(
                AttributeRule::new("AssemblyFile")
                    .required_unless("AssemblyName")
                    .exclusive_with("AssemblyName"),
            )
            .attribute(AttributeRule::new("TaskFactory"))
            .attribute(AttributeRule::new("Runtime"))
            .attribute(AttributeRule::new("Architecture"))
            .attribute(condition())
            .child(ChildRule::new(ElementKind::ParameterGroup).at_most_one())
            .child(ChildRule::new(ElementKind::TaskBody).at_most_one()),
    );

    rules.insert(
        ElementKind::ParameterGroup,
        ElementRule::new("ParameterGroup").fallback_child(ElementKind::Parameter),
    );

    rules.insert(
        ElementKind::Parameter,
        ElementRule::new("Parameter")
            .attribute(AttributeRule::new("ParameterType"))
            .attribute(AttributeRule::new("Output"))
            .attribute(AttributeRule::new("Required")),
    );

    rules.insert(
        ElementKind::TaskBody,
        ElementRule::new("TaskBody")
            .attribute(AttributeRule::new("Evaluate"))
            .allows_text()
            .skip_child_validation(),
    );

    rules.insert(
        ElementKind::Import,
        ElementRule::new("Import")
            .attribute(AttributeRule::new("Project").required())
            .attribute(condition())
            .attribute(AttributeRule::new("Sdk"))
            .attribute(AttributeRule::new("Version"))
            .attribute(AttributeRule::new("MinimumVersion")),
    );

    rules.insert(
        ElementKind::ImportGroup,
        ElementRule::new("ImportGroup")
            .attribute(condition())
            .child(ChildRule::new(ElementKind::Import)),
    );

    // Choose carries no Condition: branching is expressed by its When
    // children.
    rules.insert(
        ElementKind::Choose,
        ElementRule::new("Choose")
            .child(ChildRule::new(ElementKind::When).required())
            .child(ChildRule::new(ElementKind::Otherwise).at_most_one().must_be_last()),
    );

    rules.insert(
        ElementKind::When,
        ElementRule::new("When")
            .attribute(condition().required())
            .child(ChildRule::new(ElementKind::PropertyGroup))
            .child(ChildRule::new(ElementKind::ItemGroup))
            .child(ChildRule::new(ElementKind::Choose)),
    );

    rules.insert(
        ElementKind::Otherwise,
        ElementRule::new("Otherwise")
            .child(ChildRule::new(ElementKind::PropertyGroup))
            .child(ChildRule::new(ElementKind::ItemGroup))
            .child(ChildRule::new(ElementKind::Choose)),
    );

    rules.insert(
        ElementKind::OnError,
        ElementRule::new("OnError")
            .attribute(AttributeRule::new("ExecuteTargets").required())
            .attribute(condition()),
    );

    rules.insert(
        ElementKind::ProjectExtensions,
        ElementRule::new("ProjectExtensions")
            .allows_text()
            .skip_child_validation(),
    );

    rules.insert(
        ElementKind::Sdk,
        ElementRule::new("Sdk")
            .attribute(AttributeRule::new("Name").required())
            .attribute(AttributeRule::new("Version"))
            .attribute(AttributeRule::new("MinimumVersion")),
    );

    rules
}
