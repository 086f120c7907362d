// Prompt templates for the resume improvement tools.
// Placeholders: {job_role}, {industry}, {experience_level}, {resume}.

pub const WORDING_SYSTEM: &str =
    "You are an expert resume writer. Rewrite resume content to be more impactful and professional.";

pub const WORDING_GUIDELINES: &str = "
Guidelines:
- Use strong action verbs (Led, Developed, Implemented, Achieved, Delivered)
- Quantify achievements with numbers and metrics where possible
- Keep all information truthful - only enhance wording, never invent experience
- Optimize for ATS with role-relevant keywords
- Tailor language for {job_role} in {industry}
- Adjust tone for {experience_level} level
- Do NOT modify contact details, education dates, or institution names

Resume Structure to follow:
Name
Contact Information
Professional Summary
Education
Skills
Projects
Experience / Internships
Achievements / Certifications (if present)";

pub const WORDING_USER: &str = "Rewrite and improve this resume. Return the FULL, FINAL, CORRECTED VERSION in clean plain text format:

{resume}";

pub const ATS_SYSTEM: &str =
    "You are an ATS (Applicant Tracking System) expert. Analyze resumes for ATS compatibility.";

pub const ATS_USER: &str = "Analyze this resume for ATS compatibility for a {job_role} position in {industry}.

Format your response as:

ATS READINESS SCORE: [X]%

STRENGTHS
[List 3-5 strengths, one per line]

AREAS FOR IMPROVEMENT
[List 3-5 areas, one per line]

MISSING KEYWORDS
[List important keywords for {job_role} that are missing, one per line]

RECOMMENDATIONS
[List 3-5 specific recommendations, one per line]

Resume to analyze:
{resume}";

pub const KEYWORDS_SYSTEM: &str = "You are a keyword optimization expert for resumes.";

pub const KEYWORDS_USER: &str = "Analyze this resume for a {job_role} position in {industry} at {experience_level} level.

Format your response as:

KEYWORDS PRESENT
[List keywords found, one per line]

MISSING KEYWORDS
[List missing important keywords, one per line]

HOW TO INCORPORATE
[Provide suggestions in plain sentences, one per line]

Resume:
{resume}";

pub const GRAMMAR_SYSTEM: &str = "You are a professional editor specializing in resume writing. Fix grammar and improve clarity.";

pub const GRAMMAR_USER: &str = "Review and enhance the grammar and clarity of this resume. Return the FULL corrected resume in clean plain text:

{resume}";

pub const BULLETS_SYSTEM: &str = "You are an expert at crafting powerful resume content. Transform weak statements into compelling achievements.";

pub const BULLETS_USER: &str = "Transform this resume content to be more impactful for a {job_role} in {industry}. Use strong action verbs and the STAR method where applicable. Return the FULL improved resume in clean plain text:

{resume}";

pub const SUMMARY_SYSTEM: &str =
    "You are a career branding expert. Create compelling professional summaries.";

pub const SUMMARY_USER: &str = "Create 2-3 powerful professional summary variations for a {experience_level} level {job_role} in {industry}.

Format as:

SUMMARY OPTION 1
[3-4 sentences]

SUMMARY OPTION 2
[3-4 sentences]

SUMMARY OPTION 3
[3-4 sentences]

Base it on this resume:
{resume}";

pub const SKILLS_SYSTEM: &str =
    "You are a career advisor who understands industry skills and trends.";

pub const SKILLS_USER: &str = "Based on this resume for a {job_role} in {industry} at {experience_level} level, suggest skills to add.

Format your response as:

TECHNICAL SKILLS TO ADD
[Skills mentioned or implied but not listed, one per line]

SOFT SKILLS TO HIGHLIGHT
[Based on experience described, one per line]

TRENDING SKILLS FOR THIS ROLE
[Current in-demand skills, one per line]

CERTIFICATIONS TO CONSIDER
[Relevant certifications, one per line]

Resume:
{resume}";

pub const MATCHING_SYSTEM: &str =
    "You are a job matching analyst. Evaluate resume fit for specific roles.";

pub const MATCHING_USER: &str = "Analyze how well this resume matches a {job_role} position in {industry}.

Format your response as:

MATCH SCORE: [X]%

STRONG MATCHES
[List matching qualifications, one per line]

GAPS TO ADDRESS
[List missing qualifications, one per line]

RECOMMENDATIONS
[Specific suggestions to improve match, one per line]

Resume:
{resume}";
