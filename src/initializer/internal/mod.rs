//! Internal implementation for the initializer

pub mod effects;
pub mod executor;
pub mod steps;

use anyhow::Result;
use std::path::Path;

use crate::config::InitConfig;
use crate::git::{derive_repository_url, VersionControl};
use crate::naming::is_valid_name;
use crate::prompt::{any_text, parse_yes_no, resolve_option, Prompter, Resolution};
use crate::report::Reporter;
use crate::variant::Variant;

use self::effects::{Plan, Step};
use self::executor::Executor;
use self::steps::Identity;

use super::{InitArgs, InitOptions, RunSummary};

/// Unwrap a resolution or bail out of the enclosing function with `Quit`
macro_rules! resolved {
    ($resolution:expr) => {
        match $resolution {
            Resolution::Value(value) => value,
            Resolution::Quit => return Ok(Resolution::Quit),
        }
    };
}

pub fn select_variant(
    supplied: Option<String>,
    prompter: &mut dyn Prompter,
) -> Result<Resolution<Variant>> {
    let prompt = format!("Project type ({})", Variant::choices());
    resolve_option(supplied, |s| s.parse::<Variant>(), &prompt, prompter)
}

pub fn validate_name(input: &str) -> Result<String> {
    let name = input.trim();
    if !is_valid_name(name) {
        anyhow::bail!(
            "Invalid project name '{}': must start with a letter or underscore \
             and contain only letters, digits and underscores",
            name
        );
    }
    Ok(name.to_string())
}

/// Resolve every option up front so no prompt happens mid-transformation
pub fn resolve_options(args: InitArgs, prompter: &mut dyn Prompter) -> Result<Resolution<InitOptions>> {
    let variant = resolved!(select_variant(args.variant, prompter)?);
    let name = resolved!(resolve_option(
        args.name,
        validate_name,
        "Project name",
        prompter
    )?);
    let description = resolved!(resolve_option(
        args.description,
        any_text,
        "Project description",
        prompter
    )?);
    let author = resolved!(resolve_option(args.author, any_text, "Author", prompter)?);
    let remove_self = match args.remove {
        Some(remove) => remove,
        None => resolved!(resolve_option(
            None,
            parse_yes_no,
            "Remove the initializer afterwards? [y/n]",
            prompter
        )?),
    };

    Ok(Resolution::Value(InitOptions {
        name,
        description,
        author,
        variant,
        remove_self,
        dry_run: args.dry_run,
    }))
}

pub fn build_plan(config: &InitConfig, options: &InitOptions, url: &str) -> Plan {
    let layout = &config.layout;
    let identity = Identity {
        name: &options.name,
        description: &options.description,
        author: &options.author,
        url,
    };

    Plan {
        steps: vec![
            Step::new(
                format!("Relocating {} files", options.variant),
                steps::relocate_variant_files(layout, options.variant),
            ),
            Step::new("Swapping CI workflow", steps::swap_ci_workflow(layout)),
            Step::new(
                "Pruning variant extras",
                steps::prune_variant_extras(layout, options.variant),
            ),
            Step::new(
                format!("Renaming project to '{}'", options.name),
                steps::apply_name_substitution(layout, &config.placeholders, &identity),
            ),
            Step::new(
                "Removing initializer",
                steps::remove_self(layout, options.remove_self),
            ),
            Step::new("Committing", steps::commit(&config.vcs.commit_message)),
        ],
    }
}

pub fn run(
    root: &Path,
    config: &InitConfig,
    options: &InitOptions,
    vcs: &dyn VersionControl,
    verbose: bool,
) -> Result<RunSummary> {
    let url = derive_repository_url(vcs, &config.vcs.remote);
    let reporter = Reporter::new(options.dry_run, verbose);
    if url.is_empty() {
        reporter.debug("no remote URL found, leaving template URL in place");
    } else {
        reporter.debug(&format!("repository URL: {url}"));
    }

    let plan = build_plan(config, options, &url);
    for line in plan.describe() {
        reporter.debug(&line);
    }
    let mut executor = Executor::new(root, vcs, reporter);

    let outcome = plan
        .steps
        .iter()
        .try_for_each(|step| executor.run_step(step));

    // Preview links go even when a step failed
    let cleaned = executor.cleanup()?;
    outcome?;

    let (reporter, updated_files) = executor.finish();
    reporter.summary();

    Ok(RunSummary {
        actions: reporter.actions(),
        warnings: reporter.warnings().to_vec(),
        updated_files,
        preview_links_removed: cleaned,
        repository_url: url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;

    fn args() -> InitArgs {
        InitArgs::default()
    }

    #[test]
    fn test_resolve_all_supplied() {
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        let resolved = resolve_options(
            InitArgs {
                name: Some("my_project".into()),
                description: Some("Desc".into()),
                author: Some("Me".into()),
                variant: Some("vanilla".into()),
                remove: Some(false),
                dry_run: true,
            },
            &mut prompter,
        )
        .unwrap();

        let Resolution::Value(options) = resolved else {
            panic!("expected options");
        };
        assert_eq!(options.name, "my_project");
        assert_eq!(options.variant, Variant::Vanilla);
        assert!(options.dry_run);
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn test_invalid_supplied_name_is_fatal() {
        let mut prompter = ScriptedPrompter::new(["x"]);
        let result = resolve_options(
            InitArgs {
                name: Some("123abc".into()),
                variant: Some("cpp".into()),
                ..args()
            },
            &mut prompter,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_interactive_reprompts_bad_name() {
        let mut prompter = ScriptedPrompter::new(["cpp", "bad-name", "good_name", "d", "a", "n"]);
        let Resolution::Value(options) = resolve_options(args(), &mut prompter).unwrap() else {
            panic!("expected options");
        };
        assert_eq!(options.name, "good_name");
        assert_eq!(options.variant, Variant::Cpp);
        assert!(!options.remove_self);
        assert_eq!(prompter.asked.len(), 6);
    }

    #[test]
    fn test_quit_at_later_prompt() {
        let mut prompter = ScriptedPrompter::new(["vanilla", "foo", "q"]);
        let resolved = resolve_options(args(), &mut prompter).unwrap();
        assert_eq!(resolved, Resolution::Quit);
    }

    #[test]
    fn test_plan_step_order() {
        let options = InitOptions {
            name: "foo".into(),
            description: String::new(),
            author: String::new(),
            variant: Variant::Vanilla,
            remove_self: true,
            dry_run: false,
        };
        let plan = build_plan(&InitConfig::default(), &options, "");
        let titles: Vec<&str> = plan.steps.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Relocating vanilla files",
                "Swapping CI workflow",
                "Pruning variant extras",
                "Renaming project to 'foo'",
                "Removing initializer",
                "Committing",
            ]
        );
    }
}
