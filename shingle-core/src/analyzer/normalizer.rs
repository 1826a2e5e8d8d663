/// Bytes dropped from the text before shingling.
#[inline(always)]
const fn is_stripped(b: u8) -> bool {
    matches!(
        b,
        b' ' | b'?' | b'!' | b'@' | b'#' | b'$' | b'%' | b'&' | b'*' | b'(' | b')'
    )
}

/// Configuration options for text normalization.
#[derive(Debug, Clone, Copy)]
pub struct NormalizerConfig {
    /// When enabled, folds accented Latin vowels to their plain form.
    /// For example, "café" becomes "cafe".
    pub fold_accents: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self { fold_accents: true }
    }
}

/// Text normalizer applied to queries and record fields before shingling.
///
/// Performs the following operations:
/// - Converts all characters to lowercase (Unicode-aware)
/// - Folds `á â à ã`, `é ê è`, `í î ì`, `ó ô ò õ`, `ú û ù` (either case)
///   to the plain vowel; other accents such as `ü` or `ç` are kept
/// - Removes spaces and the characters `? ! @ # $ % & * ( )`
///
/// Tabs and newlines are not removed. None of the removed characters is a
/// folded vowel, so the order of the steps does not change the output.
///
/// # Examples
///
/// ```
/// use shingle_core::analyzer::normalizer::TextNormalizer;
///
/// let normalizer = TextNormalizer::default();
/// assert_eq!(normalizer.normalize("Olá, Mundo!"), "ola,mundo");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

impl TextNormalizer {
    /// Creates a new normalizer with the specified configuration.
    pub const fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Clears the buffer before writing and reuses its capacity.
    #[inline]
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        let fold = self.config.fold_accents;

        for ch in input.chars() {
            if ch.is_ascii() {
                let b = ch as u8;
                if !is_stripped(b) {
                    out.push(char::from(b.to_ascii_lowercase()));
                }
                continue;
            }

            for lowered in ch.to_lowercase() {
                out.push(if fold { fold_accent(lowered) } else { lowered });
            }
        }
    }

    /// Normalizes text and returns a new String.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }
}

/// Normalizes text with the default configuration.
#[inline]
pub fn normalize(input: &str) -> String {
    TextNormalizer::default().normalize(input)
}

#[inline(always)]
fn fold_accent(c: char) -> char {
    match c {
        'Á' | 'Â' | 'À' | 'Ã' | 'á' | 'â' | 'à' | 'ã' => 'a',
        'É' | 'Ê' | 'È' | 'é' | 'ê' | 'è' => 'e',
        'Í' | 'Î' | 'Ì' | 'í' | 'î' | 'ì' => 'i',
        'Ó' | 'Ô' | 'Ò' | 'Õ' | 'ó' | 'ô' | 'ò' | 'õ' => 'o',
        'Ú' | 'Û' | 'Ù' | 'ú' | 'û' | 'ù' => 'u',
        _ => c,
    }
}
