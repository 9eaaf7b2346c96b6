/// Score one text: 1 if any keyword occurs anywhere in its lower-cased form.
///
/// Matching is by substring, so `collaborat` also hits "collaboration" and
/// `lead` hits "leadership".
pub fn score(text: &str, keywords: &[&str]) -> u8 {
    let lowered = text.to_lowercase();
    u8::from(keywords.iter().any(|k| lowered.contains(k)))
}

/// Score every text in order.
pub fn predict<S: AsRef<str>>(texts: &[S], keywords: &[&str]) -> Vec<u8> {
    texts.iter().map(|t| score(t.as_ref(), keywords)).collect()
}
