// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use crate::models::ModuleCategory;

/// A catalog entry describing one AI-backed image transformation, as seen by
/// the chain editor. Immutable reference data during an execution; steps
/// reference entries by `id` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditModule {
    pub id: String,
    pub name: String,
    pub category: ModuleCategory,
    pub enabled: bool,
    pub description: String,
    pub requires_vpn: bool,
    /// Rough wall-clock estimate in seconds, for the queue display.
    pub estimated_time: u32,
    pub supported_models: Vec<String>,
    pub prompt_template: String,
}

/// The built-in editing catalog. Custom modules created through the API are
/// layered on top of these, never replacing them.
pub fn builtin_modules() -> Vec<EditModule> {
    let module = |id: &str,
                  name: &str,
                  category: ModuleCategory,
                  description: &str,
                  requires_vpn: bool,
                  estimated_time: u32,
                  supported_models: &[&str],
                  prompt_template: &str| EditModule {
        id: id.to_string(),
        name: name.to_string(),
        category,
        enabled: true,
        description: description.to_string(),
        requires_vpn,
        estimated_time,
        supported_models: supported_models.iter().map(|m| m.to_string()).collect(),
        prompt_template: prompt_template.to_string(),
    };

    vec![
        module(
            "line-art-colorization",
            "Line Art Colorization",
            ModuleCategory::Creative,
            "Detects line art and fills in colors automatically",
            false,
            8,
            &["gemini-2.5-flash-image-preview"],
            "Colorize the uploaded line art, keeping skin tones natural and consistent with the original style.",
        ),
        module(
            "object-removal",
            "Object Removal",
            ModuleCategory::Repair,
            "Removes a chosen person or object from the image",
            false,
            10,
            &["gemini-2.5-flash-image-preview", "dall-e-3"],
            "Remove the specified object from the image and reconstruct the background texture and lighting naturally.",
        ),
        module(
            "auto-lighting",
            "Auto Lighting",
            ModuleCategory::Enhancement,
            "Rebalances light and shadow across the image",
            false,
            6,
            &["gemini-2.5-flash-image-preview"],
            "Adjust the lighting to lift the subject's brightness and contrast while keeping the color temperature natural.",
        ),
        module(
            "background-replace",
            "Background Replace",
            ModuleCategory::Creative,
            "Swaps the background in one pass",
            false,
            12,
            &["gemini-2.5-flash-image-preview", "dall-e-3"],
            "Replace the background with a modern interior scene; relight the subject so it matches the new setting.",
        ),
        module(
            "style-transfer",
            "Style Transfer",
            ModuleCategory::Style,
            "Re-renders the image in a named art style",
            false,
            15,
            &["gemini-2.5-flash-image-preview", "dall-e-3"],
            "Convert the image into a cyberpunk style with neon lighting and high contrast.",
        ),
        module(
            "upscale",
            "Quality Boost",
            ModuleCategory::Enhancement,
            "Super-resolution reconstruction and detail recovery",
            false,
            20,
            &["gemini-2.5-flash-image-preview"],
            "Perform super-resolution reconstruction, sharpening detail and reducing noise.",
        ),
        module(
            "photo-restoration",
            "Photo Restoration",
            ModuleCategory::Repair,
            "Repairs damage and restores faded color",
            false,
            18,
            &["gemini-2.5-flash-image-preview"],
            "Repair tears, scratches and faded regions, restoring the original colors.",
        ),
        module(
            "portrait-enhancement",
            "Portrait Enhancement",
            ModuleCategory::Enhancement,
            "Skin smoothing and facial refinement",
            false,
            10,
            &["gemini-2.5-flash-image-preview"],
            "Apply natural skin smoothing, facial refinement and tone correction while preserving realistic texture.",
        ),
        module(
            "creative-generation",
            "Creative Generation",
            ModuleCategory::Creative,
            "Outpainting and element generation from a prompt",
            true,
            25,
            &["gemini-2.5-flash-image-preview", "dall-e-3"],
            "Extend the scene beyond the frame according to the prompt, keeping subject and background coherent.",
        ),
        module(
            "effects-composite",
            "Effects Composite",
            ModuleCategory::Creative,
            "Adds lighting and weather effects",
            false,
            12,
            &["gemini-2.5-flash-image-preview"],
            "Add cinematic lighting and particle effects to strengthen the atmosphere.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_unique_enabled_entries() {
        let catalog = builtin_modules();
        assert!(!catalog.is_empty());
        for (i, m) in catalog.iter().enumerate() {
            assert!(m.enabled, "{} should ship enabled", m.id);
            assert!(!m.prompt_template.is_empty());
            assert!(!m.supported_models.is_empty());
            assert!(
                catalog.iter().skip(i + 1).all(|other| other.id != m.id),
                "duplicate module id {}",
                m.id
            );
        }
    }
}
