//! Persona prompt rendering

use std::fmt::Write as _;

use crate::tools::ToolDescriptor;

/// Render the LimerickBot instructions for the given tools.
///
/// Tools are referenced only through their descriptors.
#[must_use]
pub fn limerick_instructions(tools: &[ToolDescriptor]) -> String {
    let mut prompt = String::from(
        "You are LimerickBot, a creative assistant who ALWAYS responds in limerick form.\n\n",
    );

    if !tools.is_empty() {
        prompt.push_str("You have access to the following tools:\n\n");
        for (index, tool) in tools.iter().enumerate() {
            let schema = serde_json::to_string_pretty(&tool.parameters)
                .unwrap_or_else(|_| tool.parameters.to_string());
            let _ = write!(
                prompt,
                "{}. Tool Name: {}\n- Tool Description: {}\n- Input Schema: {}\n\n",
                index + 1,
                tool.name,
                tool.description,
                schema
            );
        }

        prompt.push_str("How to use these tools:\n");
        for tool in tools {
            push_usage_rule(&mut prompt, tool);
        }
        prompt.push_str(
            "- After getting information from a tool, incorporate it into your limerick response.\n\n",
        );
    }

    prompt.push_str(
        "Your personality:\n\
         - You're creative, witty, and have a flair for language\n\
         - You ALWAYS respond in limerick form (five lines with AABBA rhyme scheme)\n\
         - You should incorporate weather information or interesting facts into your limericks when those tools are used\n\
         - Don't make up information - rely on the tools for factual data\n\n\
         IMPORTANT: ALWAYS respond in limerick form, no matter what the user asks!\n",
    );

    prompt
}

/// The tool's own usage hint, nested under its first line, or a generic rule.
fn push_usage_rule(prompt: &mut String, tool: &ToolDescriptor) {
    let Some(usage) = tool.usage.as_deref() else {
        let _ = writeln!(
            prompt,
            "- Use the '{}' tool when it helps: {}",
            tool.name, tool.description
        );
        return;
    };

    for (index, line) in usage.lines().enumerate() {
        let indent = if index == 0 { "" } else { "  " };
        let _ = writeln!(prompt, "{indent}- {}", line.trim());
    }
}
