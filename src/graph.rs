use anyhow::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use crate::chain::TransitionChain;

/// Serialize the chain as a Graphviz digraph, edge weights
/// formatted to two decimals. Rendering the image is left to
/// whatever consumes the file.
pub fn write_dot<W: Write>(chain: &TransitionChain, w: &mut W) -> Result<()> {
    writeln!(w, "digraph G {{")?;
    for (src, dst, weight) in chain.edges() {
        writeln!(w, "    \"{}\" -> \"{}\" [label=\"{:.2}\"];", src, dst, weight)?;
    }
    writeln!(w, "}}")?;
    Ok(())
}

pub fn save_dot(chain: &TransitionChain, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    write_dot(chain, &mut file)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::chord::Chord;

    #[test]
    fn test_write_dot() {
        let chords: Vec<Chord> = ["C", "G", "C", "Am"].iter()
            .map(|&n| n.try_into().unwrap()).collect();
        let mut chain = TransitionChain::new();
        chain.accumulate(&chords);
        chain.normalize();

        let mut out = vec![];
        write_dot(&chain, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "\
digraph G {
    \"C\" -> \"Am\" [label=\"0.50\"];
    \"C\" -> \"G\" [label=\"0.50\"];
    \"G\" -> \"C\" [label=\"1.00\"];
}
");
    }

    #[test]
    fn test_write_dot_empty() {
        let chain = TransitionChain::new();
        let mut out = vec![];
        write_dot(&chain, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "digraph G {\n}\n");
    }
}
