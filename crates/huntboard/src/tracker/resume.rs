//! Resume skill extraction and resume-to-job match scoring.
//!
//! Extraction is deliberately shallow: a fixed keyword dictionary
//! matched by substring, no NLP. The score is the share of a job's
//! skills also found in the resume, as a whole percentage.

/// Skill vocabulary recognized in resume and job text.
const SKILL_KEYWORDS: &[&str] = &[
    "javascript",
    "typescript",
    "react",
    "angular",
    "vue",
    "node",
    "express",
    "python",
    "django",
    "flask",
    "java",
    "spring",
    "c#",
    ".net",
    "php",
    "ruby",
    "rails",
    "go",
    "rust",
    "html",
    "css",
    "sass",
    "sql",
    "nosql",
    "mongodb",
    "postgresql",
    "mysql",
    "redis",
    "firebase",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "terraform",
    "jenkins",
    "gitlab",
    "github",
    "ci/cd",
    "rest",
    "graphql",
    "websocket",
    "redux",
    "jquery",
    "bootstrap",
    "tailwind",
    "webpack",
    "jest",
    "cypress",
    "selenium",
    "agile",
    "scrum",
    "git",
    "linux",
    "mobile",
    "responsive",
    "seo",
    "accessibility",
    "ux",
    "ui",
    "figma",
    "analytics",
    "security",
    "authentication",
    "oauth",
    "jwt",
    "encryption",
    "microservices",
    "serverless",
    "lambda",
    "ec2",
    "s3",
    "rds",
    "iam",
    "vpc",
    "eks",
    "devops",
    "database",
    "frontend",
    "backend",
    "fullstack",
];

/// Every dictionary skill mentioned anywhere in the text, lowercased.
pub fn extract_skills(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    SKILL_KEYWORDS
        .iter()
        .filter(|skill| haystack.contains(*skill))
        .map(|skill| skill.to_string())
        .collect()
}

/// Percentage of the job's skills covered by the resume, rounded to a
/// whole number. Either side being empty scores zero; substring overlap
/// in either direction counts as a match ("node" covers "nodejs").
pub fn match_score(resume_skills: &[String], job_skills: &[String]) -> u8 {
    if resume_skills.is_empty() || job_skills.is_empty() {
        return 0;
    }

    let matched = job_skills
        .iter()
        .filter(|job_skill| {
            resume_skills
                .iter()
                .any(|skill| skill.contains(job_skill.as_str()) || job_skill.contains(skill.as_str()))
        })
        .count();

    ((matched as f64 / job_skills.len() as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn extraction_is_case_insensitive() {
        let found = extract_skills("Senior React developer, strong TypeScript and AWS background");
        assert!(found.contains(&"react".to_string()));
        assert!(found.contains(&"typescript".to_string()));
        assert!(found.contains(&"aws".to_string()));
    }

    #[test]
    fn extraction_ignores_unknown_words() {
        assert!(extract_skills("fluent in Esperanto and interpretive dance").is_empty());
    }

    #[test]
    fn empty_sides_score_zero() {
        assert_eq!(match_score(&[], &skills(&["react"])), 0);
        assert_eq!(match_score(&skills(&["react"]), &[]), 0);
    }

    #[test]
    fn score_is_the_covered_share_of_job_skills() {
        let resume = skills(&["react", "typescript", "css"]);
        let job = skills(&["react", "typescript", "graphql", "aws"]);
        assert_eq!(match_score(&resume, &job), 50);

        let full = skills(&["react", "typescript", "graphql", "aws"]);
        assert_eq!(match_score(&full, &job), 100);
    }

    #[test]
    fn substring_overlap_counts_either_direction() {
        let resume = skills(&["nodejs"]);
        let job = skills(&["node"]);
        assert_eq!(match_score(&resume, &job), 100);
    }
}
