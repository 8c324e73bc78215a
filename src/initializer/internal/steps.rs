//! Effect planners, one per initializer step
//!
//! Each function is pure: it turns config plus resolved options into the
//! effects the step wants. The executor decides what dry-run means.

use std::path::{Path, PathBuf};

use crate::config::{LayoutSection, PlaceholderSection};
use crate::naming::import_rewrites;
use crate::variant::Variant;

use super::effects::Effect;

/// Move staged variant files into the root, then drop the staging dir
pub fn relocate_variant_files(layout: &LayoutSection, variant: Variant) -> Vec<Effect> {
    let staged = Path::new(&layout.staging_dir).join(variant.as_str());

    let mut effects: Vec<Effect> = layout
        .placeholder_files
        .iter()
        .map(|file| Effect::Move {
            from: staged.join(file),
            to: PathBuf::from(file),
            replace: true,
        })
        .collect();

    effects.push(Effect::Remove {
        path: PathBuf::from(&layout.staging_dir),
    });
    effects
}

/// Delete the generic workflow, then rename the project workflow onto it
pub fn swap_ci_workflow(layout: &LayoutSection) -> Vec<Effect> {
    vec![
        Effect::Remove {
            path: PathBuf::from(&layout.generic_workflow),
        },
        Effect::Move {
            from: PathBuf::from(&layout.project_workflow),
            to: PathBuf::from(&layout.generic_workflow),
            replace: true,
        },
    ]
}

/// Remove the native-extension extras unless the variant keeps them
pub fn prune_variant_extras(layout: &LayoutSection, variant: Variant) -> Vec<Effect> {
    if variant.keeps_cpp_extras() {
        return Vec::new();
    }
    layout
        .cpp_extras
        .iter()
        .map(|path| Effect::Remove {
            path: PathBuf::from(path),
        })
        .collect()
}

/// Values substituted into the template during the rename step
#[derive(Debug, Clone)]
pub struct Identity<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub author: &'a str,
    /// Empty when the remote URL couldn't be read
    pub url: &'a str,
}

/// Rename the package, rewrite imports, move manifests, fill placeholders
pub fn apply_name_substitution(
    layout: &LayoutSection,
    placeholders: &PlaceholderSection,
    identity: &Identity<'_>,
) -> Vec<Effect> {
    let name = identity.name;
    let new_root = PathBuf::from(name);
    let mut effects = Vec::new();

    if layout.source_root != name {
        effects.push(Effect::Move {
            from: PathBuf::from(&layout.source_root),
            to: new_root.clone(),
            replace: false,
        });
    }

    let imports = import_rewrites(&placeholders.package, name);
    effects.push(Effect::RewriteTree {
        root: new_root.clone(),
        extension: layout.source_extension.clone(),
        replacements: imports.clone(),
    });
    effects.push(Effect::RewriteTree {
        root: PathBuf::from(&layout.tests_root),
        extension: layout.source_extension.clone(),
        replacements: imports,
    });

    let mut manifest_refs = Vec::new();
    for manifest in &layout.manifests {
        let relocated = format!("{name}/{manifest}");
        effects.push(Effect::Move {
            from: PathBuf::from(manifest),
            to: new_root.join(manifest),
            replace: true,
        });
        manifest_refs.push((format!("\"{manifest}\""), format!("\"{relocated}\"")));
    }

    let mut replacements = manifest_refs;
    replacements.push((placeholders.name.clone(), name.to_string()));
    replacements.push((
        format!("\"{}\"", placeholders.package),
        format!("\"{name}\""),
    ));
    for description in &placeholders.descriptions {
        replacements.push((description.clone(), identity.description.to_string()));
    }
    replacements.push((placeholders.author.clone(), identity.author.to_string()));
    // Without a remote the template URLs map to themselves, which keeps the
    // name placeholder inside them from being rewritten
    for url in &placeholders.urls {
        let replacement = if identity.url.is_empty() {
            url.clone()
        } else {
            identity.url.to_string()
        };
        replacements.push((url.clone(), replacement));
    }

    for file in &layout.substitution_files {
        effects.push(Effect::Substitute {
            path: PathBuf::from(file),
            replacements: replacements.clone(),
        });
    }

    effects
}

/// Delete the initializer entry point when asked to
pub fn remove_self(layout: &LayoutSection, remove: bool) -> Vec<Effect> {
    if !remove {
        return Vec::new();
    }
    vec![Effect::Remove {
        path: PathBuf::from(&layout.initializer),
    }]
}

pub fn commit(message: &str) -> Vec<Effect> {
    vec![Effect::Commit {
        message: message.to_string(),
    }]
}
