//! Plan request prompts
//!
//! Turns a profile and its nutrition targets into the instruction text sent
//! to the text-generation service. The returned text is opaque to the rest
//! of the crate.

use crate::models::{ContentKind, NutritionResult, Profile};

/// System prompt sent ahead of every plan request
pub const SYSTEM_PROMPT: &str = "You are a certified fitness and nutrition assistant with expertise in:
- Evidence-based nutrition planning
- Progressive overload training principles
- Injury prevention and recovery
- Sustainable lifestyle changes

Provide structured, practical, and scientifically-backed advice.
Use markdown formatting for better readability.";

/// Weight rendered with at least one decimal ("70.0", "72.5")
fn format_kg(weight_kg: f64) -> String {
    if weight_kg.fract() == 0.0 {
        format!("{:.1}", weight_kg)
    } else {
        format!("{}", weight_kg)
    }
}

/// Optional "\n{label}: a, b" line, empty when nothing was selected
fn optional_list_line(label: &str, values: &[String]) -> String {
    if values.is_empty() {
        String::new()
    } else {
        format!("\n{}: {}", label, values.join(", "))
    }
}

/// Build the request text for one kind of content
pub fn build_prompt(kind: ContentKind, profile: &Profile, nutrition: &NutritionResult) -> String {
    match kind {
        ContentKind::Meal => meal_prompt(profile, nutrition),
        ContentKind::Workout => workout_prompt(profile),
        ContentKind::Tips => tips_prompt(profile),
    }
}

fn meal_prompt(profile: &Profile, nutrition: &NutritionResult) -> String {
    let dietary_info = optional_list_line("Dietary Restrictions", profile.dietary_restrictions());
    format!(
        "
Create a detailed, practical daily meal plan with the following parameters:

**Goal:** {goal}
**Target Calories:** {target} kcal/day
**Macros:** {protein}g protein, {carbs}g carbs, {fats}g fats
**Weight:** {weight} kg{dietary_info}

**Requirements:**
1. Provide 4-5 meals (breakfast, lunch, dinner, 1-2 snacks)
2. Include specific portion sizes and calories per meal
3. List simple, accessible ingredients
4. Add meal timing suggestions
5. Include a quick prep tip for each meal
6. Ensure meals are balanced and sustainable

Use clear markdown formatting with headers and bullet points.
",
        goal = profile.goal(),
        target = nutrition.target,
        protein = nutrition.protein_g,
        carbs = nutrition.carbs_g,
        fats = nutrition.fats_g,
        weight = format_kg(profile.weight_kg()),
        dietary_info = dietary_info,
    )
}

fn workout_prompt(profile: &Profile) -> String {
    let workout_info = optional_list_line("Preferences", profile.workout_preferences());
    format!(
        "
Create a comprehensive weekly workout routine with these parameters:

**Goal:** {goal}
**Experience Level:** {experience}
**Activity Level:** {activity}
**Weight:** {weight} kg{workout_info}

**Requirements:**
1. Provide a 5-6 day weekly split
2. Include specific exercises with sets × reps
3. Add progressive overload recommendations
4. Include warm-up and cool-down routines
5. Specify rest periods between sets
6. Add form cues for key exercises
7. Include estimated workout duration per session

Focus on sustainable, science-based programming. Use markdown formatting.
",
        goal = profile.goal(),
        experience = profile.experience_level(),
        activity = profile.activity_level(),
        weight = format_kg(profile.weight_kg()),
        workout_info = workout_info,
    )
}

fn tips_prompt(profile: &Profile) -> String {
    format!(
        "
Provide personalized lifestyle optimization tips for:

**Goal:** {goal}
**Profile:** {age}y/o {sex}, {weight}kg, {activity}

**Include:**
1. Sleep optimization (3-4 tips)
2. Stress management techniques
3. Recovery strategies
4. Supplementation basics (if applicable)
5. Habit-building advice
6. Common pitfalls to avoid

Keep it practical, evidence-based, and actionable. Use markdown formatting.
",
        goal = profile.goal(),
        age = profile.age(),
        sex = profile.sex(),
        weight = format_kg(profile.weight_kg()),
        activity = profile.activity_level(),
    )
}
