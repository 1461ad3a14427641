pub const F1_FACTS: &[&str] = &[
    // Hamilton
    "Lewis Hamilton has won 7 Formula 1 World Championships, equalling Michael Schumacher's record.",
    "Lewis Hamilton is the only Black driver in Formula 1 history and speaks out against racism in the sport.",
    "Lewis Hamilton holds the all-time record for F1 pole positions, with more than 100.",
    "Lewis Hamilton debuted with McLaren in 2007 and nearly won the title as a rookie.",
    "Lewis Hamilton is vegan and campaigns for animal rights and the environment.",
    "Lewis Hamilton founded the Hamilton Commission to improve diversity in motorsport.",
    // Leclerc
    "Charles Leclerc has raced for Scuderia Ferrari since 2019.",
    "Charles Leclerc was the first Monegasque driver to win a Grand Prix since Louis Chiron in 1931.",
    "Charles Leclerc is one of the fastest qualifiers of his generation.",
    "Charles Leclerc won the 2017 Formula 2 championship in dominant fashion.",
    "Charles Leclerc took his first F1 win at Spa in 2019, days after losing his friend Anthoine Hubert.",
    "Charles Leclerc shines on street circuits such as Monaco and Baku.",
    // Verstappen
    "Max Verstappen is a Dutch F1 driver for Red Bull Racing.",
    "Max Verstappen became the youngest Grand Prix winner at 18, in Spain 2016.",
    "Max Verstappen won his first World Championship in 2021 after a fierce fight with Hamilton.",
    "Max Verstappen set the record for most wins in a season with 19 victories in 2023.",
    "Max Verstappen is the son of former F1 driver Jos Verstappen and karting racer Sophie Kumpen.",
    "Max Verstappen raced as number 33 before taking the champion's number 1.",
    // Piastri
    "Oscar Piastri is an Australian driver who has raced for McLaren since 2023.",
    "Oscar Piastri won Formula 3 in 2020 and Formula 2 in 2021, back to back.",
    "Oscar Piastri scored his first F1 podium at the 2023 Japanese Grand Prix.",
    "Oscar Piastri joined McLaren after a contract dispute with Alpine.",
    "Oscar Piastri was Alpine's reserve driver before his F1 race debut.",
];

pub fn default_facts() -> Vec<String> {
    F1_FACTS.iter().map(|s| s.to_string()).collect()
}
