use crate::model::{Artwork, ArtworkStatus, Contact, Exhibition, GridSpan, Instagram, Series};

/// Helper to build an artwork without repeating `.to_string()` on every field
#[allow(clippy::too_many_arguments)]
fn artwork(
    id: &str,
    (title, title_en): (&str, &str),
    year: i32,
    (technique, technique_en): (&str, &str),
    dimensions: &str,
    (series, series_en): (&str, &str),
    status: ArtworkStatus,
    featured: bool,
    (description, description_en): (&str, &str),
    image_url: &str,
    (cols, rows): (u32, u32),
) -> Artwork {
    Artwork {
        id: id.to_string(),
        title: title.to_string(),
        title_en: title_en.to_string(),
        year,
        technique: technique.to_string(),
        technique_en: technique_en.to_string(),
        dimensions: dimensions.to_string(),
        series: series.to_string(),
        series_en: series_en.to_string(),
        status,
        featured,
        description: description.to_string(),
        description_en: description_en.to_string(),
        image_url: image_url.to_string(),
        grid_span: GridSpan { cols, rows },
    }
}

/// Catalogue shipped with the binary; served whenever `artworks.json` is missing or corrupt
pub fn artworks() -> Vec<Artwork> {
    vec![
        artwork(
            "fragmentos-del-tiempo",
            ("Fragmentos del Tiempo", "Fragments of Time"),
            2024,
            ("Óleo sobre lienzo", "Oil on canvas"),
            "150 x 120 cm",
            ("Deconstrucciones", "Deconstructions"),
            ArtworkStatus::Available,
            true,
            (
                "Una exploración de la percepción temporal a través de planos geométricos superpuestos que desafían la linealidad del tiempo.",
                "An exploration of temporal perception through superimposed geometric planes that challenge the linearity of time.",
            ),
            "https://images.unsplash.com/photo-1541961017774-22349e4a1262?w=800&q=80",
            (6, 2),
        ),
        artwork(
            "naturaleza-fracturada",
            ("Naturaleza Fracturada", "Fractured Nature"),
            2024,
            ("Acrílico y técnica mixta", "Acrylic and mixed media"),
            "100 x 80 cm",
            ("Paisajes Imposibles", "Impossible Landscapes"),
            ArtworkStatus::Available,
            true,
            (
                "La naturaleza vista desde múltiples ángulos simultáneos, revelando la complejidad oculta en lo cotidiano.",
                "Nature seen from multiple simultaneous angles, revealing the hidden complexity in the everyday.",
            ),
            "https://images.unsplash.com/photo-1549490349-8643362247b5?w=800&q=80",
            (4, 1),
        ),
        artwork(
            "retrato-multiplicado",
            ("Retrato Multiplicado", "Multiplied Portrait"),
            2023,
            ("Óleo sobre lienzo", "Oil on canvas"),
            "120 x 100 cm",
            ("Identidades", "Identities"),
            ArtworkStatus::Sold,
            true,
            (
                "Una investigación sobre la multiplicidad del ser, donde el rostro se descompone en facetas que revelan las distintas máscaras de la identidad.",
                "An investigation into the multiplicity of being, where the face decomposes into facets revealing the different masks of identity.",
            ),
            "https://images.unsplash.com/photo-1482160549825-59d1b23cb208?w=800&q=80",
            (4, 2),
        ),
        artwork(
            "ciudad-angular",
            ("Ciudad Angular", "Angular City"),
            2023,
            ("Acrílico sobre madera", "Acrylic on wood"),
            "180 x 140 cm",
            ("Urbanismos", "Urbanisms"),
            ArtworkStatus::Available,
            true,
            (
                "La urbe contemporánea fragmentada en planos geométricos que capturan la energía caótica de la vida urbana.",
                "The contemporary city fragmented into geometric planes capturing the chaotic energy of urban life.",
            ),
            "https://images.unsplash.com/photo-1605721911519-3dfeb3be25e7?w=800&q=80",
            (8, 2),
        ),
        artwork(
            "melodia-visual",
            ("Melodía Visual", "Visual Melody"),
            2023,
            ("Óleo y collage", "Oil and collage"),
            "90 x 70 cm",
            ("Sinestesias", "Synesthesias"),
            ArtworkStatus::Available,
            false,
            (
                "La música traducida en formas geométricas y color, una sinfonía visual que invita a escuchar con los ojos.",
                "Music translated into geometric forms and color, a visual symphony that invites you to listen with your eyes.",
            ),
            "https://images.unsplash.com/photo-1573096108468-702f6014ef28?w=800&q=80",
            (4, 1),
        ),
        artwork(
            "equilibrio-inestable",
            ("Equilibrio Inestable", "Unstable Equilibrium"),
            2022,
            ("Técnica mixta sobre lienzo", "Mixed media on canvas"),
            "160 x 130 cm",
            ("Tensiones", "Tensions"),
            ArtworkStatus::Sold,
            false,
            (
                "Formas que desafían la gravedad y la lógica, suspendidas en un momento de tensión perpetua.",
                "Forms that defy gravity and logic, suspended in a moment of perpetual tension.",
            ),
            "https://images.unsplash.com/photo-1557672172-298e090bd0f1?w=800&q=80",
            (6, 2),
        ),
        artwork(
            "memoria-geometrica",
            ("Memoria Geométrica", "Geometric Memory"),
            2022,
            ("Óleo sobre lienzo", "Oil on canvas"),
            "100 x 100 cm",
            ("Deconstrucciones", "Deconstructions"),
            ArtworkStatus::Reserved,
            false,
            (
                "Los recuerdos como fragmentos de un espejo roto, cada pieza reflejando una versión diferente del pasado.",
                "Memories as fragments of a broken mirror, each piece reflecting a different version of the past.",
            ),
            "https://images.unsplash.com/photo-1515405295579-ba7b45403062?w=800&q=80",
            (4, 1),
        ),
        artwork(
            "danza-de-planos",
            ("Danza de Planos", "Dance of Planes"),
            2024,
            ("Acrílico sobre lienzo", "Acrylic on canvas"),
            "140 x 110 cm",
            ("Movimiento", "Movement"),
            ArtworkStatus::Available,
            true,
            (
                "El movimiento capturado en múltiples instantes simultáneos, una coreografía de formas y colores.",
                "Movement captured in multiple simultaneous instants, a choreography of forms and colors.",
            ),
            "https://images.unsplash.com/photo-1536924940846-227afb31e2a5?w=800&q=80",
            (5, 2),
        ),
    ]
}

pub fn exhibitions() -> Vec<Exhibition> {
    vec![
        Exhibition {
            id: "fragmentos-contemporaneos".to_string(),
            title: "Fragmentos Contemporáneos".to_string(),
            title_en: "Contemporary Fragments".to_string(),
            venue: "Galería Marlborough".to_string(),
            location: "Madrid, España".to_string(),
            location_en: "Madrid, Spain".to_string(),
            start_date: "2026-03-15".to_string(),
            end_date: "2026-05-30".to_string(),
            description: "Una retrospectiva de las obras más recientes que exploran la fragmentación de la realidad contemporánea.".to_string(),
            description_en: "A retrospective of the most recent works exploring the fragmentation of contemporary reality.".to_string(),
            image_url: "https://images.unsplash.com/photo-1577720643272-265f09367456?w=800&q=80".to_string(),
        },
        Exhibition {
            id: "perspectivas-multiples".to_string(),
            title: "Perspectivas Múltiples".to_string(),
            title_en: "Multiple Perspectives".to_string(),
            venue: "MACBA".to_string(),
            location: "Barcelona, España".to_string(),
            location_en: "Barcelona, Spain".to_string(),
            start_date: "2025-09-01".to_string(),
            end_date: "2025-12-15".to_string(),
            description: "Diálogo entre el cubismo histórico y la visión contemporánea del artista.".to_string(),
            description_en: "Dialogue between historical cubism and the contemporary vision of the artist.".to_string(),
            image_url: "https://images.unsplash.com/photo-1518998053901-5348d3961a04?w=800&q=80".to_string(),
        },
        Exhibition {
            id: "geometrias-del-alma".to_string(),
            title: "Geometrías del Alma".to_string(),
            title_en: "Geometries of the Soul".to_string(),
            venue: "White Cube".to_string(),
            location: "Londres, Reino Unido".to_string(),
            location_en: "London, United Kingdom".to_string(),
            start_date: "2025-04-10".to_string(),
            end_date: "2025-07-20".to_string(),
            description: "Primera exposición internacional del artista en una de las galerías más prestigiosas del mundo.".to_string(),
            description_en: "First international exhibition of the artist at one of the most prestigious galleries in the world.".to_string(),
            image_url: "https://images.unsplash.com/photo-1460661419201-fd4cecdf8a8b?w=800&q=80".to_string(),
        },
    ]
}

pub fn series() -> Vec<Series> {
    [
        ("deconstrucciones", "Deconstrucciones", "Deconstructions"),
        ("paisajes-imposibles", "Paisajes Imposibles", "Impossible Landscapes"),
        ("identidades", "Identidades", "Identities"),
        ("urbanismos", "Urbanismos", "Urbanisms"),
        ("sinestesias", "Sinestesias", "Synesthesias"),
        ("tensiones", "Tensiones", "Tensions"),
        ("movimiento", "Movimiento", "Movement"),
    ]
    .into_iter()
    .map(|(id, name, name_en)| Series {
        id: id.to_string(),
        name: name.to_string(),
        name_en: name_en.to_string(),
    })
    .collect()
}

pub fn contact() -> Contact {
    Contact {
        email: "estudio@cubistajalon.com".to_string(),
        instagram: Instagram {
            handle: "@cubistajalon".to_string(),
            url: "https://www.instagram.com/cubistajalon".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let artwork_ids: HashSet<_> = artworks().into_iter().map(|a| a.id).collect();
        assert_eq!(artwork_ids.len(), artworks().len());

        let exhibition_ids: HashSet<_> = exhibitions().into_iter().map(|e| e.id).collect();
        assert_eq!(exhibition_ids.len(), exhibitions().len());

        let series_ids: HashSet<_> = series().into_iter().map(|s| s.id).collect();
        assert_eq!(series_ids.len(), series().len());
    }

    #[test]
    fn test_every_seed_artwork_belongs_to_a_seed_series() {
        let names: HashSet<_> = series().into_iter().map(|s| s.name).collect();
        for artwork in artworks() {
            assert!(names.contains(&artwork.series), "{} has no series", artwork.id);
        }
    }

    #[test]
    fn test_seed_covers_every_status() {
        let seeded = artworks();
        for status in ArtworkStatus::ALL {
            assert!(seeded.iter().any(|a| a.status == status), "no {} artwork", status);
        }
    }
}
