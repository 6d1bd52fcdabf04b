// Prompt constants for the career analysis call. The wording is part of the
// provider contract — change with care.

use crate::analyze::AssessmentAnswers;

/// System message fixing the advisor persona and output discipline.
pub const ANALYSIS_SYSTEM: &str = "You are an expert career evolution advisor specializing in AI \
    and technology careers. Analyze the user's situation and provide detailed, structured \
    guidance that is specific, actionable, and carefully tailored to their time and budget \
    constraints. Focus on practical, achievable steps and realistic market opportunities.";

/// Builds the user message, interpolating the trimmed story and the three
/// assessment answers.
pub fn build_analysis_prompt(story: &str, answers: &AssessmentAnswers) -> String {
    format!(
        r#"Analyze this professional's career situation and provide structured guidance:

Story: "{story}"

Available learning time: {time}
Learning budget: {budget}
Desired timeline: {timeline}

Please provide detailed career guidance including:
1. Career direction title and description
2. Key skills to develop with proficiency levels
3. Market statistics (demand, salary range, growth rate)
4. Specific learning resources within their time/budget constraints
5. Key milestones for their journey

Format the response as a structured JSON object with the keys "title", "description",
"timeline", "skills" (array of {{"name", "level"}}), "marketStats" ({{"demand", "salary",
"growth"}}), "resources" (array of {{"title", "type", "link", "duration", "cost"}}) and
"milestones" (array of strings).
Ensure all recommendations are specific, actionable, and within the user's constraints."#,
        story = story.trim(),
        time = answers.time,
        budget = answers.budget,
        timeline = answers.timeline,
    )
}
