use serde_json::Value;

use crate::{
    errors::Error,
    review::types::{Homework, Verdict},
    Result,
};

impl Homework {
    /// Extract a typed record from a raw submission.
    pub fn from_value(record: &Value) -> Result<Self> {
        let map = match record.as_object() {
            Some(map) if !map.is_empty() => map,
            _ => return Err(rejected("empty record".to_string())),
        };
        let Some(name) = map.get("homework_name") else {
            return Err(rejected("missing name".to_string()));
        };
        let Some(status) = map.get("status") else {
            return Err(rejected("missing status".to_string()));
        };
        let Some(name) = name.as_str() else {
            return Err(rejected("name not a string".to_string()));
        };
        let Some(status) = status.as_str() else {
            return Err(rejected("status not a string".to_string()));
        };
        let verdict = status.parse::<Verdict>().inspect_err(|e| {
            tracing::error!("submission record rejected: {e}");
        })?;

        Ok(Self {
            name: name.to_string(),
            verdict,
        })
    }

    pub fn notification(&self) -> String {
        format!("Changed review status for \"{}\". {}", self.name, self.verdict.text())
    }
}

/// Turn a raw submission record into the chat notification text.
pub fn translate(record: &Value) -> Result<String> {
    tracing::debug!("extracting homework status");
    let homework = Homework::from_value(record)?;
    tracing::debug!("homework {:?} has status {}", homework.name, homework.verdict);
    Ok(homework.notification())
}

fn rejected(reason: String) -> Error {
    tracing::error!("submission record rejected: {reason}");
    Error::Schema(reason)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn reason(record: Value) -> String {
        match translate(&record) {
            Err(Error::Schema(r)) => r,
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn approved_uses_template_and_vocabulary_verbatim() {
        let text = translate(&json!({"homework_name": "Proj1", "status": "approved"})).unwrap();
        assert_eq!(
            text,
            "Changed review status for \"Proj1\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn every_known_status_translates() {
        for verdict in Verdict::ALL {
            let text =
                translate(&json!({"homework_name": "hw", "status": verdict.as_str()})).unwrap();
            assert!(text.ends_with(verdict.text()), "{text}");
        }
    }

    #[test]
    fn extra_fields_are_ignored() {
        let hw = Homework::from_value(&json!({
            "id": 1,
            "homework_name": "user__proj.zip",
            "status": "rejected",
            "reviewer_comment": "fix tests",
        }))
        .unwrap();
        assert_eq!(hw.name, "user__proj.zip");
        assert_eq!(hw.verdict, Verdict::Rejected);
    }

    #[test]
    fn rejects_incomplete_records() {
        assert_eq!(reason(json!({})), "empty record");
        assert_eq!(reason(json!(null)), "empty record");
        assert_eq!(reason(json!({"status": "approved"})), "missing name");
        assert_eq!(reason(json!({"homework_name": "x"})), "missing status");
        assert_eq!(
            reason(json!({"homework_name": 7, "status": "approved"})),
            "name not a string"
        );
    }

    #[test]
    fn rejects_unknown_status() {
        assert_eq!(
            reason(json!({"homework_name": "x", "status": "lost"})),
            "unknown status: lost"
        );
    }
}
