use crate::models::AtomKind;

/// Content the generation should stay away from.
pub const NEGATIVE_PROMPT: &str = "blurry, low quality, distorted, deformed, \
disfigured, text, watermark, signature, extra limbs, low resolution, pixelated";

#[derive(Debug, Clone, PartialEq)]
pub struct PromptParts {
    pub prompt: String,
    pub negative_prompt: String,
}

/// Build the generation prompt from the subject and the visual parameters.
/// Pure string construction; the wavelength and amplitude thresholds map to
/// fixed descriptor words so that the same inputs always produce the same
/// prompt.
pub fn build_prompt(
    atom: AtomKind,
    subject: &str,
    wavelength: f32,
    amplitude: f32,
) -> PromptParts {
    let intensity = intensity_descriptor(wavelength);
    let density = density_descriptor(amplitude);

    let prompt = format!(
        "A {subject} emerging from the collapsing electron cloud of a {atom} atom, \
{intensity} energy waves, {density} particle fields, science fiction concept art, \
cinematic volumetric lighting, wide angle shot, sharp focus, highly detailed, 8k",
        subject = subject,
        atom = atom.as_str(),
        intensity = intensity,
        density = density,
    );

    PromptParts {
        prompt,
        negative_prompt: NEGATIVE_PROMPT.to_string(),
    }
}

pub fn intensity_descriptor(wavelength: f32) -> &'static str {
    if wavelength > 1.5 {
        "intense"
    } else if wavelength < 0.8 {
        "subtle"
    } else {
        "moderate"
    }
}

pub fn density_descriptor(amplitude: f32) -> &'static str {
    if amplitude > 1.5 {
        "dense"
    } else if amplitude < 0.8 {
        "sparse"
    } else {
        "flowing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_thresholds() {
        assert_eq!(intensity_descriptor(1.51), "intense");
        assert_eq!(intensity_descriptor(1.5), "moderate");
        assert_eq!(intensity_descriptor(0.8), "moderate");
        assert_eq!(intensity_descriptor(0.79), "subtle");
        assert_eq!(intensity_descriptor(2.0), "intense");
        assert_eq!(intensity_descriptor(0.1), "subtle");
    }

    #[test]
    fn test_density_thresholds() {
        assert_eq!(density_descriptor(1.51), "dense");
        assert_eq!(density_descriptor(1.5), "flowing");
        assert_eq!(density_descriptor(0.8), "flowing");
        assert_eq!(density_descriptor(0.79), "sparse");
        assert_eq!(density_descriptor(2.0), "dense");
        assert_eq!(density_descriptor(0.1), "sparse");
    }

    #[test]
    fn test_prompt_embeds_subject_atom_and_descriptors() {
        let parts = build_prompt(AtomKind::Carbon, "arctic fox", 2.0, 0.5);
        assert!(parts.prompt.contains("arctic fox"));
        assert!(parts.prompt.contains("carbon atom"));
        assert!(parts.prompt.contains("intense energy waves"));
        assert!(parts.prompt.contains("sparse particle fields"));
        assert!(parts.prompt.contains("cinematic volumetric lighting"));
    }

    #[test]
    fn test_negative_prompt_is_static() {
        let a = build_prompt(AtomKind::Hydrogen, "nebula", 1.0, 1.0);
        let b = build_prompt(AtomKind::Oxygen, "quasar", 2.0, 2.0);
        assert_eq!(a.negative_prompt, b.negative_prompt);
        assert_eq!(a.negative_prompt, NEGATIVE_PROMPT);
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = build_prompt(AtomKind::Helium, "jellyfish", 1.2, 1.2);
        let b = build_prompt(AtomKind::Helium, "jellyfish", 1.2, 1.2);
        assert_eq!(a, b);
    }
}
