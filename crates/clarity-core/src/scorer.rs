//! Top-level scoring API over a template or a template file

use std::path::Path;

use crate::error::Result;
use crate::template::{DetailedScore, ScoreReport, Template};

/// A template to score against: in memory or loaded from a YAML path
#[derive(Debug, Clone, Copy)]
pub enum TemplateSource<'a> {
    Template(&'a Template),
    Path(&'a Path),
}

impl<'a> From<&'a Template> for TemplateSource<'a> {
    fn from(template: &'a Template) -> Self {
        Self::Template(template)
    }
}

impl<'a> From<&'a Path> for TemplateSource<'a> {
    fn from(path: &'a Path) -> Self {
        Self::Path(path)
    }
}

fn resolve(source: TemplateSource<'_>) -> Result<Template> {
    match source {
        TemplateSource::Template(template) => Ok(template.clone()),
        TemplateSource::Path(path) => Template::load(path),
    }
}

/// Score text against a template, returning the aggregate in [0.0, 1.0]
pub fn score<'a>(text: &str, source: impl Into<TemplateSource<'a>>) -> Result<f64> {
    Ok(resolve(source.into())?.evaluate(text))
}

/// Score with a per-rule breakdown
pub fn score_detailed<'a>(
    text: &str,
    source: impl Into<TemplateSource<'a>>,
) -> Result<DetailedScore> {
    Ok(resolve(source.into())?.evaluate_detailed(text))
}

/// Score with rich explanations and overall feedback
pub fn score_with_explanations<'a>(
    text: &str,
    source: impl Into<TemplateSource<'a>>,
) -> Result<ScoreReport> {
    Ok(resolve(source.into())?.evaluate_with_explanations(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClarityError;
    use crate::rules::{params, Rule};
    use serde_yaml::Value;

    fn demo_template() -> Template {
        let mut template = Template::new("demo");
        template.add_rule(
            Rule::new(
                "contains_phrase",
                1.0,
                params([("phrase", Value::from("rust"))]),
            )
            .unwrap(),
        );
        template
    }

    #[test]
    fn test_score_from_template_reference() {
        let template = demo_template();
        assert_eq!(score("rust is fast", &template).unwrap(), 1.0);
        assert_eq!(score("nothing relevant", &template).unwrap(), 0.0);
    }

    #[test]
    fn test_score_from_yaml_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.yaml");
        demo_template().save(&path).unwrap();

        assert_eq!(score("rust is fast", path.as_path()).unwrap(), 1.0);
        let detailed = score_detailed("rust is fast", path.as_path()).unwrap();
        assert_eq!(detailed.rule_scores.len(), 1);
    }

    #[test]
    fn test_missing_path_propagates() {
        let err = score("text", Path::new("/nonexistent/t.yaml")).unwrap_err();
        assert!(matches!(err, ClarityError::TemplateNotFound { .. }));
    }

    #[test]
    fn test_explained_report_interprets_score() {
        let report = score_with_explanations("rust is fast", &demo_template()).unwrap();
        assert_eq!(report.total_score, 1.0);
        assert!(report
            .overall_feedback
            .score_interpretation
            .starts_with("Excellent"));
    }
}
