//! Prompt construction from a [`StudentProfile`].
//!
//! The profile fields are interpolated verbatim. Course lists go through
//! [`render_course_list`], which fixes the list notation the model sees.

use crate::domain::model::{PromptPair, StudentProfile};

pub const SYSTEM_INSTRUCTION: &str = "You are an academic advisor AI helping university students create a semester course registration plan.
Consider each student's major, previously registered courses, and currently registered courses.
Check the prerequisites and recommend a semester plan with the best sequence of courses to help them progress smoothly toward their degree requirements.";

pub fn build_prompt(profile: &StudentProfile) -> PromptPair {
    PromptPair {
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        user_instruction: user_instruction(profile),
    }
}

fn user_instruction(profile: &StudentProfile) -> String {
    format!(
        "Generate a semester course plan for {name}, who is majoring in {major}.
The student has completed the following courses: {completed}. They are currently registered in these courses: {in_progress}.
Based on the prerequisite requirements, recommend the best courses for the next semester to ensure steady progress toward graduation.
Prioritize courses that are prerequisites for other major courses, and suggest electives if needed.",
        name = profile.name,
        major = profile.major,
        completed = render_course_list(&profile.completed_courses),
        in_progress = render_course_list(&profile.in_progress_courses),
    )
}

/// Renders course codes as a bracketed, comma-separated list of quoted
/// strings, e.g. `['CSCE 2202', 'MACT 2123']`.
///
/// Order and duplicates are kept. Items are single-quoted unless they contain
/// a `'` and no `"`, in which case double quotes are used. Backslashes, the
/// active quote and `\n`, `\r`, `\t` are escaped.
pub fn render_course_list(courses: &[String]) -> String {
    let items: Vec<String> = courses.iter().map(|c| quote(c)).collect();
    format!("[{}]", items.join(", "))
}

fn quote(item: &str) -> String {
    let delimiter = if item.contains('\'') && !item.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(item.len() + 2);
    out.push(delimiter);
    for ch in item.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn courses(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(render_course_list(&[]), "[]");
    }

    #[test]
    fn test_render_keeps_order_and_duplicates() {
        let list = courses(&["CSCE 2303", "CSCE 2202", "CSCE 2303"]);
        assert_eq!(
            render_course_list(&list),
            "['CSCE 2303', 'CSCE 2202', 'CSCE 2303']"
        );
    }

    #[test]
    fn test_render_quotes_like_a_python_list() {
        assert_eq!(render_course_list(&courses(&["it's"])), r#"["it's"]"#);
        assert_eq!(
            render_course_list(&courses(&[r#"a'b"c"#])),
            r#"['a\'b"c']"#
        );
        assert_eq!(render_course_list(&courses(&["a\\b"])), r"['a\\b']");
        assert_eq!(render_course_list(&courses(&["a\tb\n"])), r"['a\tb\n']");
        assert_eq!(render_course_list(&courses(&[""])), "['']");
    }

    #[test]
    fn test_prompt_contains_profile_fields() {
        let profile = StudentProfile::new("A", "CS", courses(&["X1"]), courses(&["Y1", "Y2"]));
        let prompt = build_prompt(&profile);

        assert_eq!(prompt.system_instruction, SYSTEM_INSTRUCTION);
        assert!(prompt
            .user_instruction
            .starts_with("Generate a semester course plan for A, who is majoring in CS."));
        assert!(prompt
            .user_instruction
            .contains("completed the following courses: ['X1']."));
        assert!(prompt
            .user_instruction
            .contains("registered in these courses: ['Y1', 'Y2']."));
        assert!(prompt.user_instruction.contains("suggest electives if needed"));
    }

    #[test]
    fn test_prompt_with_no_courses() {
        let profile = StudentProfile::new("New Student", "Physics", vec![], vec![]);
        let prompt = build_prompt(&profile);

        assert!(prompt
            .user_instruction
            .contains("completed the following courses: []."));
        assert!(prompt
            .user_instruction
            .contains("registered in these courses: []."));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let profile = StudentProfile::sample();
        assert_eq!(build_prompt(&profile), build_prompt(&profile.clone()));
    }

    #[test]
    fn test_system_instruction_describes_advisor() {
        assert!(SYSTEM_INSTRUCTION.starts_with("You are an academic advisor AI"));
        assert!(SYSTEM_INSTRUCTION.contains("Check the prerequisites"));
    }
}
