//! Checks or fixes the formatting of a set of files by dispatching each file
//! to the tool that handles it.

use crate::error::FormatResult;
use crate::report::plural;
use crate::tools::{DiffResult, FormatTool, ToolRegistry};
use indexmap::IndexMap;
use std::path::PathBuf;

/// Files grouped by the tool responsible for them.
pub struct CodeFormatter<'a> {
    registry: &'a ToolRegistry,
    paths: Vec<PathBuf>,
    /// Tool name to files, in the order tools first appear
    groups: IndexMap<String, Vec<PathBuf>>,
}

impl<'a> CodeFormatter<'a> {
    /// Group `paths` by tool. Files no tool handles are left out.
    pub fn new(registry: &'a ToolRegistry, paths: Vec<PathBuf>) -> Self {
        let mut groups: IndexMap<String, Vec<PathBuf>> = IndexMap::new();

        for path in &paths {
            if let Some(tool) = registry.classify(path) {
                groups.entry(tool.name().to_string()).or_default().push(path.clone());
            }
        }

        Self {
            registry,
            paths,
            groups,
        }
    }

    /// All files given to the formatter, including unhandled ones.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// The non-empty groups, as (tool, files).
    pub fn groups(&self) -> impl Iterator<Item = (&dyn FormatTool, &[PathBuf])> {
        self.groups.iter().filter_map(|(name, files)| {
            let tool = self.registry.get(name)?;
            Some((tool, files.as_slice()))
        })
    }

    /// Returns {path: diff} for files with incorrect formatting.
    pub fn check(&self) -> FormatResult<DiffResult> {
        let mut errors = DiffResult::new();

        for (tool, files) in self.groups() {
            log::debug!(
                "Checking {}",
                files.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
            );
            errors.extend(tool.check(files)?);
        }

        Ok(errors)
    }

    /// Fixes format errors for supported files in place.
    pub fn fix(&self) -> FormatResult<()> {
        for (tool, files) in self.groups() {
            tool.fix(files)?;
            log::info!("Formatted {}", plural(files.len(), &format!("{} file", tool.name())));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Calls = Rc<RefCell<Vec<(String, &'static str, Vec<PathBuf>)>>>;

    /// Reports every file it is given as misformatted and records its calls
    struct FakeTool {
        name: &'static str,
        extensions: &'static [&'static str],
        calls: Calls,
        fail: bool,
    }

    impl FormatTool for FakeTool {
        fn name(&self) -> &str {
            self.name
        }

        fn extensions(&self) -> &[&str] {
            self.extensions
        }

        fn check(&self, paths: &[PathBuf]) -> FormatResult<DiffResult> {
            self.calls
                .borrow_mut()
                .push((self.name.to_string(), "check", paths.to_vec()));
            if self.fail {
                return Err(FormatError::InvocationFailed {
                    command: self.name.to_string(),
                    status: "exit status: 1".to_string(),
                    stderr: String::new(),
                });
            }
            Ok(paths
                .iter()
                .map(|p| (p.clone(), format!("diff for {}", p.display())))
                .collect())
        }

        fn fix(&self, paths: &[PathBuf]) -> FormatResult<()> {
            self.calls.borrow_mut().push((self.name.to_string(), "fix", paths.to_vec()));
            Ok(())
        }
    }

    fn registry(calls: &Calls, fail_b: bool) -> ToolRegistry {
        ToolRegistry::new(vec![
            Box::new(FakeTool {
                name: "A",
                extensions: &[".a"],
                calls: calls.clone(),
                fail: false,
            }),
            Box::new(FakeTool {
                name: "B",
                extensions: &[".b"],
                calls: calls.clone(),
                fail: fail_b,
            }),
            Box::new(FakeTool {
                name: "Unused",
                extensions: &[".u"],
                calls: calls.clone(),
                fail: false,
            }),
        ])
        .unwrap()
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_groups_by_tool_and_skips_unhandled() {
        let calls = Calls::default();
        let registry = registry(&calls, false);
        let formatter = CodeFormatter::new(&registry, paths(&["/z.b", "/x.a", "/notes.txt", "/y.b"]));

        let groups: Vec<(&str, Vec<PathBuf>)> = formatter.groups().map(|(t, f)| (t.name(), f.to_vec())).collect();
        assert_eq!(
            groups,
            vec![("B", paths(&["/z.b", "/y.b"])), ("A", paths(&["/x.a"]))]
        );
        assert_eq!(formatter.paths().len(), 4);
    }

    #[test]
    fn test_check_merges_and_sorts_by_path() {
        let calls = Calls::default();
        let registry = registry(&calls, false);
        let formatter = CodeFormatter::new(&registry, paths(&["/z.b", "/x.a", "/y.b"]));

        let errors = formatter.check().unwrap();
        let keys: Vec<&PathBuf> = errors.keys().collect();
        assert_eq!(keys, vec![&PathBuf::from("/x.a"), &PathBuf::from("/y.b"), &PathBuf::from("/z.b")]);

        // One invocation per non-empty group; the unused tool is never spawned
        let calls = calls.borrow();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|(name, mode, _)| name != "Unused" && *mode == "check"));
    }

    #[test]
    fn test_no_handled_files_means_no_errors() {
        let calls = Calls::default();
        let registry = registry(&calls, false);
        let formatter = CodeFormatter::new(&registry, paths(&["/README.md", "/LICENSE"]));

        assert!(formatter.check().unwrap().is_empty());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_check_propagates_tool_failure() {
        let calls = Calls::default();
        let registry = registry(&calls, true);
        let formatter = CodeFormatter::new(&registry, paths(&["/x.a", "/y.b"]));

        assert!(matches!(formatter.check(), Err(FormatError::InvocationFailed { .. })));
    }

    #[test]
    fn test_fix_runs_each_group_once() {
        let calls = Calls::default();
        let registry = registry(&calls, false);
        let formatter = CodeFormatter::new(&registry, paths(&["/x.a", "/y.b", "/w.a"]));

        formatter.fix().unwrap();
        let calls = calls.borrow();
        assert_eq!(
            *calls,
            vec![
                ("A".to_string(), "fix", paths(&["/x.a", "/w.a"])),
                ("B".to_string(), "fix", paths(&["/y.b"])),
            ]
        );
    }
}
