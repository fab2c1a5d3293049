//! Built-in demo corpus, used by `stemma init --seed` and `stemma view --demo`.
//!
//! Shaped to exercise every view: two category groups, a universe spanning
//! both, two dependency chains, and one dangling reference (a removed
//! parent) so `check` and focus mode have something to show.

use crate::corpus::model::TextRecord;
use crate::corpus::store::Corpus;

pub fn demo_corpus() -> Corpus {
    let mut crown = TextRecord::new("the-hollow-crown", "The Hollow Crown", "Narrative", "Root");
    crown.universe = Some("Crown Cycle".to_string());
    crown.paragraphs = vec![
        "The crown sat **empty** for a season.".to_string(),
        "No hand dared *lift* it.".to_string(),
    ];

    let mut crown_restored = TextRecord::new(
        "the-hollow-crown-restored",
        "The Hollow Crown, Restored",
        "Narrative",
        "Version",
    );
    crown_restored.universe = Some("Crown Cycle".to_string());
    crown_restored.depends_on = Some("the-hollow-crown".to_string());

    let annals = TextRecord::new("winter-annals", "Winter Annals", "Narrative", "Root");

    let mut thaw = TextRecord::new("winter-annals-thaw", "Winter Annals: Thaw", "Narrative", "Module");
    thaw.depends_on = Some("winter-annals".to_string());

    let mut rivers = TextRecord::new("on-rivers", "On Rivers", "Essay", "Root");
    rivers.paragraphs = vec!["Rivers remember __older maps__.".to_string()];

    let maps = TextRecord::new("on-maps", "On Maps", "Essay", "Root");

    let mut commentary = TextRecord::new("crown-commentary", "Crown Commentary", "Essay", "Module");
    commentary.universe = Some("Crown Cycle".to_string());
    // Its parent was removed from the corpus; the reference dangles.
    commentary.depends_on = Some("court-masque".to_string());

    let mut corpus = Corpus::new();
    corpus.load(vec![
        crown,
        crown_restored,
        annals,
        thaw,
        rivers,
        maps,
        commentary,
    ]);
    corpus
}
