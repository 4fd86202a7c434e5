// Lexicon
// Static word lists for the rewriter: contractions, synonyms, stopwords and
// academic transition phrases. Keys are lowercase.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Contraction -> expansion. Expansions are lowercase except the pronoun "I".
pub const CONTRACTIONS: &[(&str, &str)] = &[
    ("ain't", "is not"),
    ("aren't", "are not"),
    ("can't", "cannot"),
    ("couldn't", "could not"),
    ("could've", "could have"),
    ("didn't", "did not"),
    ("doesn't", "does not"),
    ("don't", "do not"),
    ("hadn't", "had not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("he'd", "he would"),
    ("he'll", "he will"),
    ("he's", "he is"),
    ("here's", "here is"),
    ("how's", "how is"),
    ("i'd", "I would"),
    ("i'll", "I will"),
    ("i'm", "I am"),
    ("i've", "I have"),
    ("isn't", "is not"),
    ("it'd", "it would"),
    ("it'll", "it will"),
    ("it's", "it is"),
    ("let's", "let us"),
    ("mightn't", "might not"),
    ("might've", "might have"),
    ("mustn't", "must not"),
    ("must've", "must have"),
    ("needn't", "need not"),
    ("shan't", "shall not"),
    ("she'd", "she would"),
    ("she'll", "she will"),
    ("she's", "she is"),
    ("shouldn't", "should not"),
    ("should've", "should have"),
    ("that'll", "that will"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("they'd", "they would"),
    ("they'll", "they will"),
    ("they're", "they are"),
    ("they've", "they have"),
    ("wasn't", "was not"),
    ("we'd", "we would"),
    ("we'll", "we will"),
    ("we're", "we are"),
    ("we've", "we have"),
    ("weren't", "were not"),
    ("what's", "what is"),
    ("where's", "where is"),
    ("who's", "who is"),
    ("who've", "who have"),
    ("won't", "will not"),
    ("wouldn't", "would not"),
    ("would've", "would have"),
    ("you'd", "you would"),
    ("you'll", "you will"),
    ("you're", "you are"),
    ("you've", "you have"),
];

/// Word -> interchangeable candidates (same part of speech and inflection).
pub const SYNONYMS: &[(&str, &[&str])] = &[
    ("show", &["demonstrate", "indicate", "reveal"]),
    ("shows", &["demonstrates", "indicates", "reveals"]),
    ("showed", &["demonstrated", "indicated", "revealed"]),
    ("use", &["employ", "utilize", "apply"]),
    ("uses", &["employs", "utilizes", "applies"]),
    ("used", &["employed", "utilized", "applied"]),
    ("using", &["employing", "utilizing", "applying"]),
    ("help", &["assist", "aid", "support"]),
    ("helps", &["assists", "aids", "supports"]),
    ("get", &["obtain", "acquire", "gain"]),
    ("gets", &["obtains", "acquires", "gains"]),
    ("make", &["create", "produce", "generate"]),
    ("makes", &["creates", "produces", "generates"]),
    ("find", &["identify", "discover", "detect"]),
    ("found", &["identified", "discovered", "observed"]),
    ("suggest", &["indicate", "imply", "propose"]),
    ("suggests", &["indicates", "implies", "proposes"]),
    ("examine", &["investigate", "analyze", "explore"]),
    ("examined", &["investigated", "analyzed", "explored"]),
    ("study", &["investigation", "analysis", "inquiry"]),
    ("studies", &["investigations", "analyses", "inquiries"]),
    ("result", &["outcome", "finding", "consequence"]),
    ("results", &["outcomes", "findings"]),
    ("important", &["significant", "crucial", "essential"]),
    ("big", &["large", "substantial", "considerable"]),
    ("large", &["substantial", "considerable", "sizable"]),
    ("small", &["modest", "limited", "minor"]),
    ("good", &["favorable", "positive", "sound"]),
    ("bad", &["poor", "unfavorable", "adverse"]),
    ("new", &["novel", "recent", "emerging"]),
    ("recent", &["current", "contemporary", "latest"]),
    ("clear", &["evident", "apparent", "obvious"]),
    ("clearly", &["evidently", "plainly", "distinctly"]),
    ("promising", &["encouraging", "hopeful", "favorable"]),
    ("many", &["numerous", "several", "various"]),
    ("often", &["frequently", "commonly", "regularly"]),
    ("usually", &["typically", "generally", "normally"]),
    ("also", &["additionally", "likewise"]),
    ("very", &["highly", "remarkably", "particularly"]),
    ("really", &["truly", "genuinely", "indeed"]),
    ("quickly", &["rapidly", "swiftly", "promptly"]),
    ("however", &["nevertheless", "nonetheless", "yet"]),
    ("therefore", &["thus", "consequently", "hence"]),
    ("thus", &["therefore", "hence", "consequently"]),
    ("method", &["approach", "technique", "procedure"]),
    ("methods", &["approaches", "techniques", "procedures"]),
    ("approach", &["method", "strategy", "technique"]),
    ("problem", &["issue", "challenge", "difficulty"]),
    ("problems", &["issues", "challenges", "difficulties"]),
    ("issue", &["problem", "concern", "matter"]),
    ("issues", &["problems", "concerns", "matters"]),
    ("idea", &["notion", "concept", "proposition"]),
    ("ideas", &["notions", "concepts", "propositions"]),
    ("goal", &["objective", "aim", "purpose"]),
    ("goals", &["objectives", "aims", "purposes"]),
    ("way", &["manner", "means", "method"]),
    ("ways", &["manners", "means", "methods"]),
    ("area", &["domain", "field", "sphere"]),
    ("areas", &["domains", "fields", "spheres"]),
    ("part", &["component", "portion", "element"]),
    ("parts", &["components", "portions", "elements"]),
    ("effect", &["impact", "influence", "consequence"]),
    ("effects", &["impacts", "influences", "consequences"]),
    ("evidence", &["support", "proof", "data"]),
    ("data", &["information", "evidence", "records"]),
    ("research", &["scholarship", "inquiry", "investigation"]),
    ("researchers", &["scholars", "investigators", "scientists"]),
    ("change", &["shift", "modification", "alteration"]),
    ("changes", &["shifts", "modifications", "alterations"]),
    ("increase", &["rise", "growth", "gain"]),
    ("decrease", &["decline", "reduction", "drop"]),
    ("improve", &["enhance", "strengthen", "refine"]),
    ("improves", &["enhances", "strengthens", "refines"]),
    ("improved", &["enhanced", "strengthened", "refined"]),
    ("provide", &["offer", "supply", "deliver"]),
    ("provides", &["offers", "supplies", "delivers"]),
    ("provided", &["offered", "supplied", "delivered"]),
    ("need", &["require", "necessitate"]),
    ("needs", &["requires", "necessitates"]),
    ("allow", &["enable", "permit"]),
    ("allows", &["enables", "permits"]),
    ("explain", &["clarify", "describe", "elucidate"]),
    ("explains", &["clarifies", "describes", "elucidates"]),
    ("consider", &["examine", "regard", "contemplate"]),
    ("considered", &["regarded", "deemed", "viewed"]),
    ("ignored", &["overlooked", "disregarded", "neglected"]),
    ("ignore", &["overlook", "disregard", "neglect"]),
    ("focus", &["concentrate", "center"]),
    ("focuses", &["concentrates", "centers"]),
    ("begin", &["commence", "start", "initiate"]),
    ("began", &["commenced", "started", "initiated"]),
    ("end", &["conclusion", "close", "termination"]),
    ("key", &["central", "principal", "primary"]),
    ("main", &["primary", "principal", "central"]),
    ("major", &["significant", "principal", "substantial"]),
    ("common", &["prevalent", "widespread", "frequent"]),
    ("different", &["distinct", "diverse", "varied"]),
    ("similar", &["comparable", "analogous", "alike"]),
    ("difficult", &["challenging", "demanding", "arduous"]),
    ("easy", &["simple", "straightforward", "effortless"]),
    ("possible", &["feasible", "plausible", "conceivable"]),
    ("likely", &["probable", "plausible"]),
    ("strong", &["robust", "powerful", "compelling"]),
    ("weak", &["limited", "feeble", "tenuous"]),
    ("useful", &["valuable", "beneficial", "helpful"]),
    ("complex", &["intricate", "complicated", "elaborate"]),
    ("simple", &["straightforward", "basic", "uncomplicated"]),
    ("overall", &["general", "broad", "comprehensive"]),
    ("current", &["present", "existing", "contemporary"]),
    ("previous", &["prior", "earlier", "preceding"]),
    ("significant", &["substantial", "notable", "considerable"]),
    ("significantly", &["substantially", "notably", "considerably"]),
    ("approximately", &["roughly", "about", "nearly"]),
    ("mostly", &["largely", "primarily", "mainly"]),
    ("mainly", &["primarily", "chiefly", "largely"]),
    ("directly", &["immediately", "explicitly"]),
    ("especially", &["particularly", "notably", "specifically"]),
    ("particularly", &["especially", "notably", "specifically"]),
    ("enough", &["sufficient", "adequate"]),
    ("whole", &["entire", "complete", "full"]),
    ("rapid", &["swift", "quick", "fast"]),
    ("growing", &["expanding", "increasing", "rising"]),
    ("benefit", &["advantage", "gain"]),
    ("benefits", &["advantages", "gains"]),
    ("role", &["function", "part", "position"]),
    ("aspect", &["facet", "dimension", "feature"]),
    ("aspects", &["facets", "dimensions", "features"]),
    ("field", &["discipline", "domain", "area"]),
    ("work", &["research", "scholarship", "effort"]),
    ("task", &["assignment", "undertaking", "duty"]),
    ("tasks", &["assignments", "undertakings", "duties"]),
    ("test", &["evaluate", "assess", "examine"]),
    ("tested", &["evaluated", "assessed", "examined"]),
    ("measure", &["assess", "gauge", "quantify"]),
    ("measured", &["assessed", "gauged", "quantified"]),
    ("compare", &["contrast", "juxtapose"]),
    ("compared", &["contrasted", "juxtaposed"]),
    ("describe", &["depict", "characterize", "outline"]),
    ("described", &["depicted", "characterized", "outlined"]),
    ("support", &["reinforce", "corroborate", "bolster"]),
    ("supports", &["reinforces", "corroborates", "bolsters"]),
    ("argue", &["contend", "assert", "maintain"]),
    ("argues", &["contends", "asserts", "maintains"]),
    ("claim", &["assert", "maintain", "contend"]),
    ("claims", &["asserts", "maintains", "contends"]),
    ("affect", &["influence", "impact"]),
    ("affects", &["influences", "impacts"]),
    ("achieve", &["attain", "accomplish", "realize"]),
    ("achieved", &["attained", "accomplished", "realized"]),
    ("reduce", &["lower", "diminish", "decrease"]),
    ("reduces", &["lowers", "diminishes", "decreases"]),
    ("develop", &["establish", "formulate", "devise"]),
    ("developed", &["established", "formulated", "devised"]),
];

/// Function words never considered for synonym substitution.
pub const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "nor", "so", "yet", "for", "of", "in", "on", "at",
    "to", "from", "by", "with", "without", "about", "into", "onto", "over", "under", "between",
    "among", "through", "during", "before", "after", "above", "below", "up", "down", "out",
    "off", "again", "further", "then", "once", "here", "there", "when", "where", "why", "how",
    "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "not",
    "only", "own", "same", "than", "too", "can", "will", "just", "should", "would", "could",
    "might", "must", "shall", "may", "is", "am", "are", "was", "were", "be", "been", "being",
    "have", "has", "had", "having", "do", "does", "did", "doing", "i", "me", "my", "we", "us",
    "our", "you", "your", "he", "him", "his", "she", "her", "it", "its", "they", "them",
    "their", "this", "that", "these", "those", "what", "which", "who", "whom", "whose", "as",
    "if", "because", "while", "until", "against", "per", "via", "et", "al", "cannot",
];

/// Academic connectives. Callers add the trailing ", ".
pub const TRANSITIONS: &[&str] = &[
    "Moreover",
    "Furthermore",
    "In addition",
    "Additionally",
    "Notably",
    "Importantly",
    "Indeed",
    "Likewise",
    "Similarly",
    "In particular",
    "Equally important",
    "Beyond this",
];

pub fn contraction_index() -> &'static HashMap<&'static str, &'static str> {
    static INDEX: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    INDEX.get_or_init(|| CONTRACTIONS.iter().copied().collect())
}

pub fn synonym_index() -> &'static HashMap<&'static str, &'static [&'static str]> {
    static INDEX: OnceLock<HashMap<&'static str, &'static [&'static str]>> = OnceLock::new();
    INDEX.get_or_init(|| SYNONYMS.iter().copied().collect())
}

pub fn stopword_set() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOPWORDS.iter().copied().collect())
}

pub fn is_stopword(lower: &str) -> bool {
    stopword_set().contains(lower)
}

pub fn synonyms_for(lower: &str) -> Option<&'static [&'static str]> {
    synonym_index().get(lower).copied()
}

pub fn expansion_for(lower: &str) -> Option<&'static str> {
    contraction_index().get(lower).copied()
}
