//! Unicode symbol table for prose text.
//!
//! Every key is a single character, so substitution is a plain per-character
//! lookup and ordering between entries does not matter. The table is only
//! consulted for escaped prose: math spans, inline code and verbatim blocks
//! never pass through it.

use phf::phf_map;

/// Unicode character -> LaTeX replacement used in escaped text.
pub static UNICODE_TO_LATEX: phf::Map<char, &'static str> = phf_map! {
    // Dashes
    '—' => "---",
    '–' => "--",

    // Greek letters
    'α' => "$\\alpha$",
    'β' => "$\\beta$",
    'γ' => "$\\gamma$",
    'δ' => "$\\delta$",
    'ε' => "$\\varepsilon$",
    'ζ' => "$\\zeta$",
    'η' => "$\\eta$",
    'θ' => "$\\theta$",
    'λ' => "$\\lambda$",
    'μ' => "$\\mu$",
    'ν' => "$\\nu$",
    'π' => "$\\pi$",
    'σ' => "$\\sigma$",
    'τ' => "$\\tau$",
    'φ' => "$\\varphi$",
    'ω' => "$\\omega$",
    'Γ' => "$\\Gamma$",
    'Δ' => "$\\Delta$",
    'Θ' => "$\\Theta$",
    'Λ' => "$\\Lambda$",
    'Ξ' => "$\\Xi$",
    'Π' => "$\\Pi$",
    'Σ' => "$\\Sigma$",
    'Φ' => "$\\Phi$",
    'Ψ' => "$\\Psi$",
    'Ω' => "$\\Omega$",

    // Operators and relations
    '±' => "$\\pm$",
    '∓' => "$\\mp$",
    '×' => "$\\times$",
    '÷' => "$\\div$",
    '√' => "$\\sqrt{}$",
    '∛' => "$\\sqrt[3]{}$",
    '∜' => "$\\sqrt[4]{}$",
    '∞' => "$\\infty$",
    '≈' => "$\\approx$",
    '≠' => "$\\neq$",
    '≤' => "$\\leq$",
    '≥' => "$\\geq$",
    '≡' => "$\\equiv$",
    '∝' => "$\\propto$",
    '∫' => "$\\int$",
    '∮' => "$\\oint$",
    '∑' => "$\\sum$",
    '∏' => "$\\prod$",
    '∂' => "$\\partial$",
    '∇' => "$\\nabla$",
    '∆' => "$\\Delta$",
    '°' => "$^\\circ$",
    '∙' => "$\\cdot$",
    '⋅' => "$\\cdot$",
    '′' => "$\\prime$",
    '″' => "$\\prime\\prime$",
    '‴' => "$\\prime\\prime\\prime$",

    // Arrows
    '→' => "$\\rightarrow$",
    '←' => "$\\leftarrow$",
    '↑' => "$\\uparrow$",
    '↓' => "$\\downarrow$",
    '↔' => "$\\leftrightarrow$",
    '⇒' => "$\\Rightarrow$",
    '⇐' => "$\\Leftarrow$",
    '⇔' => "$\\Leftrightarrow$",

    // Sets
    '∩' => "$\\cap$",
    '∪' => "$\\cup$",
    '⊂' => "$\\subset$",
    '⊃' => "$\\supset$",
    '⊆' => "$\\subseteq$",
    '⊇' => "$\\supseteq$",
    '∈' => "$\\in$",
    '∉' => "$\\notin$",

    // Superscripts
    '⁰' => "$^0$",
    '¹' => "$^1$",
    '²' => "$^2$",
    '³' => "$^3$",
    '⁴' => "$^4$",
    '⁵' => "$^5$",
    '⁶' => "$^6$",
    '⁷' => "$^7$",
    '⁸' => "$^8$",
    '⁹' => "$^9$",
    '⁻' => "$^-$",

    // Currency
    '€' => "\\texteuro{}",
    '£' => "\\pounds{}",
    '¥' => "\\textyen{}",
    '¢' => "\\textcent{}",

    // Typographic marks
    '©' => "\\textcopyright{}",
    '®' => "\\textregistered{}",
    '™' => "\\texttrademark{}",
    '§' => "\\S{}",
    '¶' => "\\P{}",
    '†' => "\\dag{}",
    '‡' => "\\ddag{}",
    '•' => "\\textbullet{}",
    '‰' => "\\textperthousand{}",
};

/// Look up the LaTeX replacement for a prose character.
#[inline]
pub fn symbol_for(ch: char) -> Option<&'static str> {
    UNICODE_TO_LATEX.get(&ch).copied()
}
