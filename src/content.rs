use std::collections::BTreeMap;

/// Shown when a registry has nothing for the requested key.
pub const FALLBACK_FRAGMENT: &str = "<p>Ingen information tillgänglig.</p>";

/// Immutable identifier to HTML fragment mapping used to fill modal bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRegistry {
    entries: BTreeMap<&'static str, &'static str>,
}

impl ContentRegistry {
    pub fn new(entries: impl IntoIterator<Item = (&'static str, &'static str)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Never misses: unknown keys resolve to the fallback fragment.
    pub fn resolve(&self, key: &str) -> &'static str {
        self.entries.get(key).copied().unwrap_or(FALLBACK_FRAGMENT)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "trainers" => Some(Self::trainers()),
            "memberships" => Some(Self::memberships()),
            _ => None,
        }
    }

    pub fn trainers() -> Self {
        Self::new(TRAINERS)
    }

    pub fn memberships() -> Self {
        Self::new(MEMBERSHIPS)
    }
}

const TRAINERS: [(&str, &str); 7] = [
    (
        "leif",
        "<h2>Leif \"Benlåset\" - BJJ-tränare</h2><h3>Kort presentation:</h3><p>Leif har över 10 års erfarenhet inom Brazilian Jiu-Jitsu (BJJ). Han började sin karriär i början av 2000-talet och har tävlat på högsta nivå både nationellt och internationellt.</p><h3>Meriter:</h3><ul><li>Svart bälte i BJJ</li><li>2:a plats på SM 2020</li><li>1:a plats på European Open 2019</li></ul><h3>Träningsfilosofi:</h3><p>Leif fokuserar på teknik och positionering snarare än styrka.</p><h3>Kontakt:</h3><p><strong>E-post:</strong> leif@jarnviljakampsport.com</p>",
    ),
    (
        "tony",
        "<h2>Tony McClinch - Thaiboxningstränare</h2><h3>Kort presentation:</h3><p>Tony har över 15 års erfarenhet inom thaiboxning och har tränat både nybörjare och professionella fighters.</p><h3>Meriter:</h3><ul><li>1:a plats på SM i thaiboxning 2018</li><li>3:a plats på European Muay Thai Championship 2020</li></ul><h3>Träningsfilosofi:</h3><p>Tony betonar vikten av att bygga styrka och uthållighet samtidigt som man arbetar med tekniska detaljer.</p><h3>Kontakt:</h3><p><strong>E-post:</strong> tony@jarnviljakampsport.com</p>",
    ),
    (
        "hanna",
        "<h2>Hanna \"Kroknäsa\" Karlsson - Boxningstränare</h2><h3>Kort presentation:</h3><p>Hanna är en tidigare landslagsboxare som har en lång erfarenhet av att träna både amatörer och professionella boxare.</p><h3>Meriter:</h3><ul><li>Flerfaldig svensk mästare i boxning</li><li>2:a plats på European Boxing Championships 2017</li></ul><h3>Träningsfilosofi:</h3><p>Hanna fokuserar på fotarbete och precision i slagen.</p><h3>Kontakt:</h3><p><strong>E-post:</strong> hanna@jarnviljakampsport.com</p>",
    ),
    (
        "kajsa",
        "<h2>Kettlebell-Kajsa - Fystränare</h2><h3>Kort presentation:</h3><p>Kajsa har över 10 års erfarenhet av funktionell träning och kettlebellträning.</p><h3>Meriter:</h3><ul><li>Certifierad personlig tränare</li><li>Kettlebellinstruktör med flera certifikat</li></ul><h3>Träningsfilosofi:</h3><p>Kajsa tror på att stärka hela kroppen genom funktionella rörelser.</p><h3>Kontakt:</h3><p><strong>E-post:</strong> kajsa@jarnviljakampsport.com</p>",
    ),
    (
        "fanny",
        "<h2>Fanny \"Stenpanna\" Berg - Thaiboxningstränare</h2><h3>Kort presentation:</h3><p>Fanny är känd för sin oförstörbara mentalitet och sina tuffa, hårda slag.</p><h3>Meriter:</h3><ul><li>3:e plats på SM i thaiboxning 2019</li><li>Tränat flera fighters till framgång på klubbnivå</li></ul><h3>Träningsfilosofi:</h3><p>Fanny fokuserar på att bygga både styrka och mental uthållighet.</p><h3>Kontakt:</h3><p><strong>E-post:</strong> fanny@jarnviljakampsport.com</p>",
    ),
    (
        "bella",
        "<h2>Bella \"Strypnacke\" Johansson - BJJ-tränare</h2><h3>Kort presentation:</h3><p>Bella är en mästare på BJJ och har en förkärlek för strypningar.</p><h3>Meriter:</h3><ul><li>Svart bälte i BJJ</li><li>1:a plats på SM i BJJ 2021</li></ul><h3>Träningsfilosofi:</h3><p>Bella fokuserar på teknik och positionering snarare än styrka.</p><h3>Kontakt:</h3><p><strong>E-post:</strong> bella@jarnviljakampsport.com</p>",
    ),
    (
        "micke",
        "<h2>Micke \"Huvudskada\" Andersson - Boxningstränare</h2><h3>Kort presentation:</h3><p>Micke har ett rykte om sig att vara en av de hårdaste boxningstränarna i klubben, men han är också otroligt pedagogisk.</p><h3>Meriter:</h3><ul><li>Tidigare landslagsboxare</li><li>2:a plats på SM i boxning 2018</li></ul><h3>Träningsfilosofi:</h3><p>Micke tror på snabbhet och precision framför råstyrka.</p><h3>Kontakt:</h3><p><strong>E-post:</strong> micke@jarnviljakampsport.com</p>",
    ),
];

const MEMBERSHIPS: [(&str, &str); 5] = [
    (
        "manadsmedlemskap",
        "<h2>Månadsmedlemskap</h2><p>Träna fritt på alla pass under vald period.</p><table><tr><th>Period</th><th>Ordinarie</th><th>Student/Arbetslös</th><th>Ungdom</th></tr><tr><td>12 mån</td><td>6000 kr</td><td>4800 kr</td><td>4000 kr</td></tr><tr><td>6 mån</td><td>3600 kr</td><td>3000 kr</td><td>2500 kr</td></tr><tr><td>3 mån</td><td>2000 kr</td><td>1600 kr</td><td>1300 kr</td></tr></table>",
    ),
    (
        "autogiro-bundet",
        "<h2>Autogiro Bundet</h2><table><tr><th>Typ</th><th>Ordinarie</th><th>Student</th><th>Ungdom</th></tr><tr><td>12 mån</td><td>500 kr/mån</td><td>400 kr/mån</td><td>350 kr/mån</td></tr></table>",
    ),
    (
        "autogiro-obundet",
        "<h2>Autogiro Obundet</h2><table><tr><th>Typ</th><th>Ordinarie</th><th>Student</th><th>Ungdom</th></tr><tr><td>Obundet</td><td>600 kr/mån</td><td>500 kr/mån</td><td>400 kr/mån</td></tr></table>",
    ),
    (
        "10-klippkort",
        "<h2>10-klippkort</h2><table><tr><th>Typ</th><th>Ordinarie</th><th>Student</th><th>Ungdom</th></tr><tr><td>10 gånger</td><td>1200 kr</td><td>1000 kr</td><td>900 kr</td></tr></table>",
    ),
    (
        "engangspass",
        "<h2>Engångspass</h2><table><tr><th>Typ</th><th>Ordinarie</th><th>Student</th><th>Ungdom</th></tr><tr><td>1 gång</td><td>150 kr</td><td>120 kr</td><td>100 kr</td></tr></table>",
    ),
];
