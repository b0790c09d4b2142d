use chrono::{Duration, Utc};
use url::Url;

use super::domain::{JobSource, NewJob, SourceId};

/// Derive a display name for a job board from its URL: the first host
/// label, `www.` stripped, first letter capitalized. An unparseable
/// URL falls back to the raw string.
pub fn source_name_from_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let Some(host) = parsed.host_str() else {
        return url.to_string();
    };

    let domain = host.trim_start_matches("www.");
    let label = domain.split('.').next().unwrap_or(domain);

    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => url.to_string(),
    }
}

/// Produce the fixture listings for a source. Real scraping is out of
/// scope; each known board maps to a hardcoded batch, everything else
/// gets the generic batch.
pub fn scrape(source: &JobSource) -> Vec<NewJob> {
    match source_name_from_url(&source.url).to_lowercase().as_str() {
        "linkedin" => linkedin_jobs(source.id),
        "indeed" => indeed_jobs(source.id),
        "glassdoor" => glassdoor_jobs(source.id),
        _ => generic_jobs(source.id),
    }
}

fn listing(
    source_id: SourceId,
    title: &str,
    company: &str,
    location: &str,
    job_type: &str,
    description: &str,
    days_ago: i64,
    url: &str,
    flags: (bool, bool, bool),
) -> NewJob {
    let (is_easy_apply, is_fresher, is_internship) = flags;
    NewJob {
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        job_type: job_type.to_string(),
        description: description.to_string(),
        posted_date: Utc::now() - Duration::days(days_ago),
        url: url.to_string(),
        source_id,
        is_easy_apply,
        is_fresher,
        is_internship,
    }
}

fn linkedin_jobs(source_id: SourceId) -> Vec<NewJob> {
    vec![
        listing(
            source_id,
            "Junior React Developer",
            "TechStart",
            "Bangalore, India (Remote)",
            "Full-time",
            "Great opportunity for freshers to learn React and modern frontend development practices in a fast-paced startup environment.",
            4,
            "https://linkedin.com/jobs/view/junior-react-developer",
            (true, true, false),
        ),
        listing(
            source_id,
            "Data Science Intern",
            "Analytics Hub",
            "Remote",
            "Internship (3 months)",
            "Looking for students or recent graduates interested in data science. You'll work with real data sets and learn machine learning techniques.",
            2,
            "https://linkedin.com/jobs/view/data-science-intern",
            (true, true, true),
        ),
        listing(
            source_id,
            "Graduate Software Engineer",
            "Infosys",
            "Hyderabad, India",
            "Full-time",
            "Entry-level role for engineering graduates. Training provided in full-stack development with Java and React.",
            9,
            "https://linkedin.com/jobs/view/graduate-software-engineer",
            (true, true, false),
        ),
        listing(
            source_id,
            "DevOps Engineer Intern",
            "TechSystems Inc",
            "Bangalore, India",
            "Internship (6 months)",
            "Join our DevOps team to learn CI/CD pipelines, Kubernetes, and Terraform. You'll work with experienced engineers to automate infrastructure deployment.",
            1,
            "https://linkedin.com/jobs/view/devops-engineer-intern",
            (true, true, true),
        ),
    ]
}

fn indeed_jobs(source_id: SourceId) -> Vec<NewJob> {
    vec![
        listing(
            source_id,
            "Frontend Development Trainee",
            "WebGenius",
            "Pune, India",
            "Full-time",
            "6-month training program for freshers in HTML, CSS, JavaScript, and React. Successful candidates will join our development team.",
            5,
            "https://indeed.com/jobs/frontend-development-trainee",
            (false, true, false),
        ),
        listing(
            source_id,
            "Junior QA Engineer",
            "TestMaster",
            "Chennai, India",
            "Full-time",
            "Looking for detail-oriented freshers to join our quality assurance team. Will train on manual and automated testing processes.",
            8,
            "https://indeed.com/jobs/junior-qa-engineer",
            (false, true, false),
        ),
        listing(
            source_id,
            "Marketing Intern",
            "GrowthHackers",
            "Mumbai, India (Hybrid)",
            "Internship (6 months)",
            "Join our marketing team to learn digital marketing, SEO, and social media strategy. Stipend provided.",
            3,
            "https://indeed.com/jobs/marketing-intern",
            (false, true, true),
        ),
        listing(
            source_id,
            "Terraform Infrastructure Engineer",
            "InfraTech Solutions",
            "Hyderabad, India",
            "Full-time",
            "Looking for a Terraform expert to help manage our infrastructure as code. Experience with AWS is required.",
            4,
            "https://indeed.com/jobs/terraform-infrastructure-engineer",
            (false, false, false),
        ),
    ]
}

fn glassdoor_jobs(source_id: SourceId) -> Vec<NewJob> {
    vec![
        listing(
            source_id,
            "Entry Level Python Developer",
            "DataCraft",
            "Delhi NCR, India",
            "Full-time",
            "Great opportunity for freshers with knowledge of Python. You'll work on data processing pipelines and backend services.",
            6,
            "https://glassdoor.com/jobs/entry-level-python-developer",
            (false, true, false),
        ),
        listing(
            source_id,
            "UI/UX Design Intern",
            "DesignLabs",
            "Bangalore, India",
            "Internship (4 months)",
            "Learn UI/UX design principles and tools including Figma and Adobe XD. Portfolio development opportunity.",
            7,
            "https://glassdoor.com/jobs/ui-ux-design-intern",
            (false, true, true),
        ),
        listing(
            source_id,
            "Associate Cloud Engineer",
            "SkyBridge",
            "Mumbai, India (Remote)",
            "Full-time",
            "Entry-level cloud engineering role covering AWS fundamentals, EC2, S3, and infrastructure automation. Certification support included.",
            2,
            "https://glassdoor.com/jobs/associate-cloud-engineer",
            (false, true, false),
        ),
    ]
}

fn generic_jobs(source_id: SourceId) -> Vec<NewJob> {
    vec![
        listing(
            source_id,
            "Software Developer (Fresher)",
            "CodeWorks",
            "Remote",
            "Full-time",
            "Entry-level software development position with mentorship. Open to recent graduates from any engineering discipline.",
            3,
            "https://example.com/jobs/software-developer-fresher",
            (false, true, false),
        ),
        listing(
            source_id,
            "Backend Engineering Intern",
            "StackForge",
            "Pune, India",
            "Internship (6 months)",
            "Work alongside our backend team building REST services. Exposure to databases, caching, and API design.",
            1,
            "https://example.com/jobs/backend-engineering-intern",
            (false, true, true),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(url: &str) -> JobSource {
        JobSource {
            id: 1,
            user_id: 1,
            url: url.to_string(),
            name: source_name_from_url(url),
            last_synced: None,
        }
    }

    #[test]
    fn derives_display_name_from_host() {
        assert_eq!(source_name_from_url("https://linkedin.com/jobs"), "Linkedin");
        assert_eq!(source_name_from_url("https://www.indeed.com"), "Indeed");
        assert_eq!(source_name_from_url("https://glassdoor.com"), "Glassdoor");
    }

    #[test]
    fn unparseable_url_falls_back_to_raw_string() {
        assert_eq!(source_name_from_url("not a url"), "not a url");
    }

    #[test]
    fn known_boards_get_their_fixture_batch() {
        let jobs = scrape(&source("https://linkedin.com/jobs"));
        assert!(!jobs.is_empty());
        assert!(jobs.iter().all(|job| job.source_id == 1));
        assert!(jobs.iter().all(|job| job.url.contains("linkedin.com")));
    }

    #[test]
    fn unknown_boards_get_the_generic_batch() {
        let jobs = scrape(&source("https://jobs.supercorp.dev/listings"));
        assert!(!jobs.is_empty());
        assert!(jobs.iter().all(|job| job.url.contains("example.com")));
    }
}
