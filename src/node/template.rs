//! Name templates for rule families.

use crate::node::declaration::NodeInstance;

/// Expands one declaration into multiple named output instances.
///
/// The pattern carries one `%` placeholder per substitution table; expansion
/// is the Cartesian product of the tables, each tuple substituting into the
/// placeholders in order. A four-engine family like
/// `"Eng (%) N1 Cooldown Duration"` over the table `["1","2","3","4"]`
/// yields four independent output identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTemplate {
    pattern: String,
    tables: Vec<Vec<String>>,
}

impl NameTemplate {
    pub fn new(pattern: impl Into<String>, tables: Vec<Vec<String>>) -> Self {
        let pattern = pattern.into();
        let placeholders = pattern.matches('%').count();
        assert_eq!(
            placeholders,
            tables.len(),
            "template '{}' has {} placeholders but {} tables",
            pattern,
            placeholders,
            tables.len()
        );
        Self { pattern, tables }
    }

    /// Single-table shorthand, the common case.
    pub fn over(pattern: impl Into<String>, values: impl IntoIterator<Item = String>) -> Self {
        Self::new(pattern, vec![values.into_iter().collect()])
    }

    /// Resolves the output name for one substitution tuple.
    pub fn substitute(&self, subs: &[String]) -> String {
        let mut out = String::with_capacity(self.pattern.len());
        let mut parts = self.pattern.split('%');
        if let Some(first) = parts.next() {
            out.push_str(first);
        }
        for (part, sub) in parts.zip(subs) {
            out.push_str(sub);
            out.push_str(part);
        }
        out
    }

    /// All instances, in table order.
    pub fn expand(&self) -> Vec<NodeInstance> {
        let mut tuples: Vec<Vec<String>> = vec![Vec::new()];
        for table in &self.tables {
            let mut next = Vec::with_capacity(tuples.len() * table.len());
            for tuple in &tuples {
                for value in table {
                    let mut t = tuple.clone();
                    t.push(value.clone());
                    next.push(t);
                }
            }
            tuples = next;
        }
        tuples
            .into_iter()
            .map(|subs| NodeInstance {
                output_name: self.substitute(&subs),
                subs,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_table_expansion() {
        let t = NameTemplate::over(
            "Eng (%) N1 Cooldown Duration",
            (1..=4).map(|n| n.to_string()),
        );
        let names: Vec<String> = t.expand().into_iter().map(|i| i.output_name).collect();
        assert_eq!(names.len(), 4);
        assert_eq!(names[0], "Eng (1) N1 Cooldown Duration");
        assert_eq!(names[3], "Eng (4) N1 Cooldown Duration");
    }

    #[test]
    fn test_cartesian_product() {
        let t = NameTemplate::new(
            "Eng (%) Gas Temp During % Max",
            vec![
                vec!["1".into(), "2".into()],
                vec!["Takeoff".into(), "Go Around".into()],
            ],
        );
        let names: Vec<String> = t.expand().into_iter().map(|i| i.output_name).collect();
        assert_eq!(
            names,
            vec![
                "Eng (1) Gas Temp During Takeoff Max",
                "Eng (1) Gas Temp During Go Around Max",
                "Eng (2) Gas Temp During Takeoff Max",
                "Eng (2) Gas Temp During Go Around Max",
            ]
        );
    }

    #[test]
    fn test_instance_carries_subs() {
        let t = NameTemplate::over("Eng (%) Start", ["2".to_string()]);
        let inst = &t.expand()[0];
        assert_eq!(inst.subs, vec!["2".to_string()]);
    }

    #[test]
    #[should_panic(expected = "placeholders")]
    fn test_placeholder_table_mismatch_panics() {
        NameTemplate::new("Eng (%) % Max", vec![vec!["1".into()]]);
    }
}
