//! Bundled reference data for the Mascara wilaya.
//!
//! Everything here is built once on first access and is immutable for the
//! lifetime of the process. The kindergarten list doubles as the fallback
//! when the remote table is unavailable or empty.

use crate::models::{AgeRange, Category, Listing, LocalizedText, LookupEntry, WorkingHours};
use std::sync::LazyLock;

static MUNICIPALITIES: LazyLock<Vec<LookupEntry>> = LazyLock::new(|| {
    vec![
        lookup("mascara", "معسكر", "Mascara", "Mascara", "city"),
        lookup("sig", "سيق", "Sig", "Sig", "city"),
        lookup("mohammadia", "المحمدية", "Mohammadia", "Mohammadia", "city"),
        lookup("tighennif", "تيغنيف", "Tighennif", "Tighennif", "city"),
        lookup("ghriss", "غريس", "Ghriss", "Ghriss", "city"),
        lookup("bouhanifia", "بوحنيفية", "Bouhanifia", "Bouhanifia", "city"),
        lookup("hachem", "حاشم", "Hachem", "Hachem", "city"),
        lookup("oued-el-abtal", "وادي الأبطال", "Oued El Abtal", "Oued El Abtal", "city"),
        lookup("ain-fares", "عين فارس", "Aïn Farès", "Ain Fares", "city"),
        lookup("zahana", "زهانة", "Zahana", "Zahana", "city"),
    ]
});

static SERVICES: LazyLock<Vec<LookupEntry>> = LazyLock::new(|| {
    vec![
        lookup("transport", "النقل المدرسي", "Transport scolaire", "School transport", "bus"),
        lookup("meals", "وجبات", "Repas", "Meals", "utensils"),
        lookup("nap", "قاعة نوم", "Salle de sieste", "Nap room", "bed"),
        lookup("medical", "متابعة طبية", "Suivi médical", "Medical follow-up", "stethoscope"),
        lookup("cameras", "كاميرات مراقبة", "Caméras de surveillance", "Security cameras", "camera"),
        lookup("extended-hours", "دوام مطول", "Horaires prolongés", "Extended hours", "clock"),
    ]
});

static ACTIVITIES: LazyLock<Vec<LookupEntry>> = LazyLock::new(|| {
    vec![
        lookup("quran", "تحفيظ القرآن", "Mémorisation du Coran", "Quran memorization", "book"),
        lookup("languages", "لغات", "Langues", "Languages", "languages"),
        lookup("drawing", "رسم", "Dessin", "Drawing", "palette"),
        lookup("music", "موسيقى", "Musique", "Music", "music"),
        lookup("sports", "رياضة", "Sport", "Sports", "ball"),
        lookup("computing", "إعلام آلي", "Informatique", "Computing", "laptop"),
    ]
});

static KINDERGARTENS: LazyLock<Vec<Listing>> = LazyLock::new(|| {
    vec![
        ListingBuilder::new("kg-1", Category::Kindergarten, "mascara")
            .name("روضة البراعم", "Crèche Les Bourgeons", "The Buds Kindergarten")
            .address("حي الأمير عبد القادر، معسكر", "Cité Emir Abdelkader, Mascara", "Emir Abdelkader district, Mascara")
            .description(
                "روضة تستقبل الأطفال من 3 إلى 5 سنوات مع برنامج تربوي متكامل",
                "Crèche accueillant les enfants de 3 à 5 ans avec un programme éducatif complet",
                "Kindergarten for children aged 3 to 5 with a full educational program",
            )
            .phone("0550 12 34 56")
            .rating(4.8, 52)
            .price(4500)
            .ages(3, 5)
            .hours("07:30", "17:00", "sun-thu")
            .services(&["transport", "meals", "nap", "cameras"])
            .activities(&["quran", "drawing", "languages"])
            .facilities(&["garden", "playground"])
            .autism_wing(true)
            .build(),
        ListingBuilder::new("kg-2", Category::Kindergarten, "sig")
            .name("روضة الأمل", "Jardin d'enfants L'Espoir", "Hope Kindergarten")
            .address("شارع أول نوفمبر، سيق", "Rue du 1er Novembre, Sig", "1st November street, Sig")
            .phone("0661 23 45 67")
            .rating(4.5, 31)
            .price(3500)
            .ages(2, 5)
            .hours("08:00", "16:30", "sun-thu")
            .services(&["meals", "nap"])
            .activities(&["drawing", "music", "sports"])
            .facilities(&["playground"])
            .build(),
        ListingBuilder::new("kg-3", Category::Kindergarten, "mohammadia")
            .name("روضة النجوم الصغيرة", "Les Petites Étoiles", "Little Stars")
            .address("وسط المدينة، المحمدية", "Centre-ville, Mohammadia", "Downtown, Mohammadia")
            .phone("0770 34 56 78")
            .rating(4.3, 18)
            .price(6000)
            .ages(3, 6)
            .hours("07:00", "18:00", "sun-thu")
            .services(&["transport", "meals", "medical", "extended-hours"])
            .activities(&["languages", "computing", "sports"])
            .facilities(&["library", "garden"])
            .build(),
        ListingBuilder::new("kg-4", Category::Kindergarten, "mascara")
            .name("روضة الفراشات", "Crèche Les Papillons", "Butterflies Nursery")
            .address("حي بابا علي، معسكر", "Quartier Baba Ali, Mascara", "Baba Ali district, Mascara")
            .phone("0551 45 67 89")
            .rating(4.1, 12)
            .price(5200)
            .ages(2, 4)
            .hours("08:00", "17:00", "sun-thu")
            .services(&["meals", "nap", "cameras"])
            .activities(&["quran", "music"])
            .build(),
        ListingBuilder::new("kg-5", Category::Kindergarten, "tighennif")
            .name("روضة الياسمين", "Jardin Le Jasmin", "Jasmine Garden")
            .address("طريق معسكر، تيغنيف", "Route de Mascara, Tighennif", "Mascara road, Tighennif")
            .phone("0662 56 78 90")
            .rating(3.9, 9)
            .price(3000)
            .ages(3, 5)
            .hours("08:00", "16:00", "sun-thu")
            .services(&["transport"])
            .activities(&["quran", "drawing"])
            .autism_wing(true)
            .build(),
        ListingBuilder::new("kg-6", Category::Kindergarten, "ghriss")
            .name("روضة قوس قزح", "Crèche Arc-en-ciel", "Rainbow Nursery")
            .address("حي 200 مسكن، غريس", "Cité 200 logements, Ghriss", "200 housing estate, Ghriss")
            .phone("0771 67 89 01")
            .rating(4.6, 24)
            .price(4000)
            .ages(2, 6)
            .hours("07:30", "17:30", "sun-thu")
            .services(&["meals", "nap", "medical"])
            .activities(&["languages", "drawing", "sports", "music"])
            .facilities(&["pool", "playground"])
            .build(),
    ]
});

static DOCTORS: LazyLock<Vec<Listing>> = LazyLock::new(|| {
    vec![
        ListingBuilder::new("doc-1", Category::Doctor, "mascara")
            .name("د. سعاد بن يوسف", "Dr Souad Benyoucef", "Dr Souad Benyoucef")
            .address("شارع خالدي عبد القادر، معسكر", "Rue Khaldi Abdelkader, Mascara", "Khaldi Abdelkader street, Mascara")
            .specialty("طب الأطفال", "Pédiatrie", "Pediatrics")
            .phone("045 80 12 34")
            .rating(4.9, 87)
            .price(1500)
            .ages(0, 15)
            .hours("09:00", "16:00", "sat-thu")
            .build(),
        ListingBuilder::new("doc-2", Category::Doctor, "sig")
            .name("د. كريم حمداني", "Dr Karim Hamdani", "Dr Karim Hamdani")
            .address("حي السلام، سيق", "Cité Essalam, Sig", "Essalam district, Sig")
            .specialty("طب الأطفال", "Pédiatrie", "Pediatrics")
            .phone("045 83 45 67")
            .rating(4.6, 40)
            .price(1200)
            .ages(0, 15)
            .hours("08:30", "15:30", "sun-thu")
            .build(),
        ListingBuilder::new("doc-3", Category::Doctor, "mohammadia")
            .name("د. نادية مسعودي", "Dr Nadia Messaoudi", "Dr Nadia Messaoudi")
            .address("وسط المدينة، المحمدية", "Centre-ville, Mohammadia", "Downtown, Mohammadia")
            .specialty("طب الأسنان للأطفال", "Pédodontie", "Pediatric dentistry")
            .phone("045 84 56 78")
            .rating(4.4, 22)
            .price(2000)
            .ages(2, 15)
            .hours("09:00", "17:00", "sat-wed")
            .build(),
        ListingBuilder::new("doc-4", Category::Doctor, "ghriss")
            .name("د. عمر زروقي", "Dr Omar Zerrouki", "Dr Omar Zerrouki")
            .address("شارع الاستقلال، غريس", "Rue de l'Indépendance, Ghriss", "Independence street, Ghriss")
            .specialty("طب العيون", "Ophtalmologie pédiatrique", "Pediatric ophthalmology")
            .phone("045 85 67 89")
            .rating(4.2, 15)
            .price(2500)
            .ages(0, 15)
            .hours("08:00", "14:00", "sun-thu")
            .build(),
    ]
});

static SPEECH_THERAPISTS: LazyLock<Vec<Listing>> = LazyLock::new(|| {
    vec![
        ListingBuilder::new("st-1", Category::SpeechTherapist, "mascara")
            .name("أ. ليلى بوزيد", "Mme Leila Bouzid", "Leila Bouzid")
            .address("حي الشهداء، معسكر", "Cité des Martyrs, Mascara", "Martyrs district, Mascara")
            .specialty("تأخر النطق", "Retard de langage", "Language delay")
            .phone("0552 11 22 33")
            .rating(4.9, 34)
            .price(2000)
            .ages(2, 12)
            .hours("09:00", "17:00", "sun-thu")
            .autism_wing(true)
            .build(),
        ListingBuilder::new("st-2", Category::SpeechTherapist, "sig")
            .name("أ. ياسين رحال", "M. Yacine Rahal", "Yacine Rahal")
            .address("شارع العربي بن مهيدي، سيق", "Rue Larbi Ben M'hidi, Sig", "Larbi Ben M'hidi street, Sig")
            .specialty("التأتأة", "Bégaiement", "Stuttering")
            .phone("0663 22 33 44")
            .rating(4.5, 19)
            .price(1800)
            .ages(3, 15)
            .hours("10:00", "18:00", "sat-wed")
            .build(),
        ListingBuilder::new("st-3", Category::SpeechTherapist, "bouhanifia")
            .name("أ. فاطمة الزهراء مداني", "Mme Fatima Zohra Medani", "Fatima Zohra Medani")
            .address("وسط المدينة، بوحنيفية", "Centre-ville, Bouhanifia", "Downtown, Bouhanifia")
            .specialty("اضطراب طيف التوحد", "Troubles du spectre autistique", "Autism spectrum disorder")
            .phone("0772 33 44 55")
            .rating(4.7, 27)
            .price(2200)
            .ages(2, 12)
            .hours("08:30", "16:30", "sun-thu")
            .autism_wing(true)
            .build(),
        ListingBuilder::new("st-4", Category::SpeechTherapist, "mascara")
            .name("أ. سمير عبيد", "M. Samir Abid", "Samir Abid")
            .address("حي 500 مسكن، معسكر", "Cité 500 logements, Mascara", "500 housing estate, Mascara")
            .specialty("صعوبات التعلم", "Troubles d'apprentissage", "Learning disorders")
            .phone("0553 44 55 66")
            .rating(4.0, 8)
            .price(1500)
            .ages(4, 15)
            .hours("13:00", "19:00", "sun-thu")
            .build(),
    ]
});

static CLOTHING_STORES: LazyLock<Vec<Listing>> = LazyLock::new(|| {
    vec![
        ListingBuilder::new("cs-1", Category::ClothingStore, "mascara")
            .name("عالم الصغار", "Le Monde des Petits", "Little Ones' World")
            .address("شارع الأمير عبد القادر، معسكر", "Rue Emir Abdelkader, Mascara", "Emir Abdelkader street, Mascara")
            .phone("0554 10 20 30")
            .rating(4.4, 41)
            .ages(0, 12)
            .hours("09:00", "19:00", "sat-thu")
            .build(),
        ListingBuilder::new("cs-2", Category::ClothingStore, "sig")
            .name("بيبي شيك", "Bébé Chic", "Baby Chic")
            .address("السوق المغطى، سيق", "Marché couvert, Sig", "Covered market, Sig")
            .phone("0664 20 30 40")
            .rating(4.1, 16)
            .ages(0, 4)
            .hours("09:00", "18:00", "sat-thu")
            .build(),
        ListingBuilder::new("cs-3", Category::ClothingStore, "mohammadia")
            .name("أزياء البراءة", "Mode Innocence", "Innocence Fashion")
            .address("شارع محمد خميستي، المحمدية", "Rue Mohamed Khemisti, Mohammadia", "Mohamed Khemisti street, Mohammadia")
            .phone("0773 30 40 50")
            .rating(3.8, 7)
            .ages(2, 14)
            .hours("10:00", "19:00", "sat-thu")
            .build(),
        ListingBuilder::new("cs-4", Category::ClothingStore, "mascara")
            .name("كيدز ستايل", "Kids Style", "Kids Style")
            .address("المركز التجاري، معسكر", "Centre commercial, Mascara", "Shopping mall, Mascara")
            .phone("0555 40 50 60")
            .rating(4.6, 33)
            .ages(0, 14)
            .hours("10:00", "21:00", "sat-thu")
            .build(),
        ListingBuilder::new("cs-5", Category::ClothingStore, "tighennif")
            .name("ملابس الفرح", "Vêtements La Joie", "Joy Clothing")
            .address("وسط المدينة، تيغنيف", "Centre-ville, Tighennif", "Downtown, Tighennif")
            .phone("0665 50 60 70")
            .rating(4.0, 11)
            .ages(0, 10)
            .hours("09:00", "18:30", "sat-thu")
            .build(),
        ListingBuilder::new("cs-6", Category::ClothingStore, "ghriss")
            .name("زهرة الطفولة", "Fleur d'Enfance", "Childhood Blossom")
            .address("شارع الشهداء، غريس", "Rue des Martyrs, Ghriss", "Martyrs street, Ghriss")
            .phone("0774 60 70 80")
            .rating(4.2, 14)
            .ages(0, 12)
            .hours("09:00", "19:00", "sat-thu")
            .build(),
    ]
});

/// Bundled listings of a category
pub fn listings(category: Category) -> &'static [Listing] {
    match category {
        Category::Kindergarten => KINDERGARTENS.as_slice(),
        Category::Doctor => DOCTORS.as_slice(),
        Category::SpeechTherapist => SPEECH_THERAPISTS.as_slice(),
        Category::ClothingStore => CLOTHING_STORES.as_slice(),
    }
}

pub fn municipalities() -> &'static [LookupEntry] {
    MUNICIPALITIES.as_slice()
}

pub fn services() -> &'static [LookupEntry] {
    SERVICES.as_slice()
}

pub fn activities() -> &'static [LookupEntry] {
    ACTIVITIES.as_slice()
}

fn lookup(id: &str, ar: &str, fr: &str, en: &str, icon: &str) -> LookupEntry {
    LookupEntry {
        id: id.to_string(),
        name: LocalizedText::new(ar, fr, en),
        icon: icon.to_string(),
    }
}

/// Compact construction of bundled listings
struct ListingBuilder {
    listing: Listing,
}

impl ListingBuilder {
    fn new(id: &str, category: Category, municipality_id: &str) -> Self {
        Self {
            listing: Listing {
                id: id.to_string(),
                category,
                name: LocalizedText::default(),
                address: LocalizedText::default(),
                description: LocalizedText::default(),
                municipality_id: municipality_id.to_string(),
                phone: String::new(),
                rating: 0.0,
                review_count: 0,
                images: vec![format!("/images/{}/{}.webp", category.slug(), id)],
                price: 0,
                age_range: AgeRange::default(),
                working_hours: WorkingHours::default(),
                services: vec![],
                activities: vec![],
                facilities: vec![],
                has_autism_wing: false,
                specialty: None,
                owner_id: None,
            },
        }
    }

    fn name(mut self, ar: &str, fr: &str, en: &str) -> Self {
        self.listing.name = LocalizedText::new(ar, fr, en);
        self
    }

    fn address(mut self, ar: &str, fr: &str, en: &str) -> Self {
        self.listing.address = LocalizedText::new(ar, fr, en);
        self
    }

    fn description(mut self, ar: &str, fr: &str, en: &str) -> Self {
        self.listing.description = LocalizedText::new(ar, fr, en);
        self
    }

    fn specialty(mut self, ar: &str, fr: &str, en: &str) -> Self {
        self.listing.specialty = Some(LocalizedText::new(ar, fr, en));
        self
    }

    fn phone(mut self, phone: &str) -> Self {
        self.listing.phone = phone.to_string();
        self
    }

    fn rating(mut self, rating: f64, review_count: u32) -> Self {
        self.listing.rating = rating;
        self.listing.review_count = review_count;
        self
    }

    fn price(mut self, price: u32) -> Self {
        self.listing.price = price;
        self
    }

    fn ages(mut self, min: u8, max: u8) -> Self {
        self.listing.age_range = AgeRange { min, max };
        self
    }

    fn hours(mut self, open: &str, close: &str, days: &str) -> Self {
        self.listing.working_hours = WorkingHours {
            open: open.to_string(),
            close: close.to_string(),
            days: days.to_string(),
        };
        self
    }

    fn services(mut self, ids: &[&str]) -> Self {
        self.listing.services = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    fn activities(mut self, ids: &[&str]) -> Self {
        self.listing.activities = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    fn facilities(mut self, ids: &[&str]) -> Self {
        self.listing.facilities = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    fn autism_wing(mut self, flag: bool) -> Self {
        self.listing.has_autism_wing = flag;
        self
    }

    fn build(self) -> Listing {
        self.listing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique_per_list() {
        for category in Category::ALL {
            let list = listings(category);
            let ids: HashSet<_> = list.iter().map(|l| l.id.as_str()).collect();
            assert_eq!(ids.len(), list.len(), "duplicate id in {:?}", category);
            assert!(list.iter().all(|l| l.category == category));
        }
    }

    #[test]
    fn test_references_resolve() {
        let municipality_ids: HashSet<_> = municipalities().iter().map(|m| m.id.as_str()).collect();
        let service_ids: HashSet<_> = services().iter().map(|s| s.id.as_str()).collect();
        let activity_ids: HashSet<_> = activities().iter().map(|a| a.id.as_str()).collect();

        for category in Category::ALL {
            for listing in listings(category) {
                assert!(municipality_ids.contains(listing.municipality_id.as_str()));
                assert!(listing.services.iter().all(|s| service_ids.contains(s.as_str())));
                assert!(listing.activities.iter().all(|a| activity_ids.contains(a.as_str())));
                assert!(listing.rating >= 0.0 && listing.rating <= 5.0);
            }
        }
    }

    #[test]
    fn test_clothing_store_sample() {
        let stores = listings(Category::ClothingStore);
        assert_eq!(stores.len(), 6);
        assert_eq!(stores.iter().filter(|s| s.municipality_id == "mascara").count(), 2);
    }
}
