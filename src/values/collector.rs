use super::{parse_assignment, ValueMap};
use crate::{
    constants::STDIN_INDICATOR,
    error::Result,
    ioutils::{ensure_stdin_read_once, read_from},
    prompt::ValuePrompter,
};

/// Collects values from all available sources: catalog defaults, values
/// files (or stdin), `NAME=VALUE` assignments, and finally interactive prompts
/// for anything still missing.
pub struct ValueCollector<'a> {
    prompter: Option<&'a dyn ValuePrompter>,
}

impl<'a> ValueCollector<'a> {
    /// Without a prompter the collector never asks; missing names stay unresolved.
    pub fn new(prompter: Option<&'a dyn ValuePrompter>) -> Self {
        Self { prompter }
    }

    /// Merges every source in precedence order, lowest first.
    ///
    /// # Arguments
    /// * `defaults` - Values declared by the catalog
    /// * `sources` - Values files, or `-` for stdin
    /// * `assignments` - `NAME=VALUE` pairs from the command line
    /// * `required` - Placeholder names the selected templates reference
    pub fn collect(
        &self,
        defaults: ValueMap,
        sources: &[String],
        assignments: &[String],
        required: &[String],
    ) -> Result<ValueMap> {
        ensure_stdin_read_once(sources.iter().map(String::as_str))?;
        let mut values = defaults;

        for source in sources {
            let loaded = if source == STDIN_INDICATOR {
                ValueMap::from_yaml_str(&read_from(std::io::stdin())?)?
            } else {
                ValueMap::load(source)?
            };
            log::debug!("Loaded {} values from {source}", loaded.len());
            values.merge(loaded);
        }

        for assignment in assignments {
            let (name, value) = parse_assignment(assignment)?;
            if let Some(previous) = values.insert(name.clone(), value) {
                log::debug!("--set {name} overrides '{previous}'");
            }
        }

        if let Some(prompter) = self.prompter {
            for name in required {
                if values.contains(name) {
                    continue;
                }
                match prompter.prompt_value(name)? {
                    Some(value) => {
                        values.insert(name.clone(), value);
                    }
                    None => log::info!("{name} left for manual completion"),
                }
            }
        }

        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::RefCell;
    use std::io::Write;

    /// Answers from a fixed list and records which names were asked.
    struct ScriptedPrompter {
        answers: Vec<(&'static str, Option<&'static str>)>,
        asked: RefCell<Vec<String>>,
    }

    impl ValuePrompter for ScriptedPrompter {
        fn prompt_value(&self, name: &str) -> Result<Option<String>> {
            self.asked.borrow_mut().push(name.to_string());
            Ok(self
                .answers
                .iter()
                .find(|(n, _)| *n == name)
                .and_then(|(_, v)| v.map(str::to_string)))
        }
    }

    fn required(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn assignments_override_files_and_defaults() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "AMOUNT: \"$100.00\"\nDAYS: 15").unwrap();
        let source = file.path().to_str().unwrap().to_string();

        let defaults: ValueMap = [("DAYS", "30"), ("LAW", "Delaware")].into_iter().collect();
        let values = ValueCollector::new(None)
            .collect(defaults, &[source], &["AMOUNT=$300.00".to_string()], &[])
            .unwrap();

        assert_eq!(values.get("AMOUNT"), Some("$300.00"));
        assert_eq!(values.get("DAYS"), Some("15"));
        assert_eq!(values.get("LAW"), Some("Delaware"));
    }

    #[test]
    fn prompts_only_for_missing_names() {
        let prompter = ScriptedPrompter {
            answers: vec![("DAYS", Some("30")), ("SIGNATORY", None)],
            asked: RefCell::new(Vec::new()),
        };
        let values = ValueCollector::new(Some(&prompter))
            .collect(
                ValueMap::new(),
                &[],
                &["AMOUNT=$300.00".to_string()],
                &required(&["AMOUNT", "DAYS", "SIGNATORY"]),
            )
            .unwrap();

        assert_eq!(*prompter.asked.borrow(), vec!["DAYS", "SIGNATORY"]);
        assert_eq!(values.get("DAYS"), Some("30"));
        assert!(!values.contains("SIGNATORY"));
    }

    #[test]
    fn non_interactive_leaves_missing_names_alone() {
        let values = ValueCollector::new(None)
            .collect(ValueMap::new(), &[], &[], &required(&["DAYS"]))
            .unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn stdin_source_given_twice_is_rejected() {
        let sources = vec!["-".to_string(), "-".to_string()];
        let err = ValueCollector::new(None)
            .collect(ValueMap::new(), &sources, &[], &[])
            .unwrap_err();
        assert!(matches!(err, Error::StdinReusedError { uses: 2 }));
    }

    #[test]
    fn bad_assignment_is_an_error() {
        let err = ValueCollector::new(None)
            .collect(ValueMap::new(), &[], &["DAYS".to_string()], &[])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAssignment(_)));
    }
}
