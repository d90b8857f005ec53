//! Demo dataset for the memory backend.
//!
//! Seeds the store with a small editorial snapshot of the PPIDK Timtengka
//! site: authors, taxonomy, a dozen articles and the site-wide globals, so a
//! memory-backed instance serves meaningful pages out of the box.

use kabar_core::{JsonValue, Map, error::Error, json};
use kabar_model::{
    Article, Author, Category, Collection, Navigation, Rubric, SiteSettings, Tag,
};
use kabar_store::{ContentSource, MemoryStore};

/// Loads the demo dataset into the store.
pub(crate) async fn load(store: &MemoryStore) -> Result<(), Error> {
    let rina = Author::create(
        store,
        data(json!({
            "name": "Rina Putri",
            "bio": rich_text("Jurnalis kampus yang meliput kegiatan pelajar Indonesia di Mesir."),
            "email": "rina@ppidk-timtengka.org",
            "role": "journalist",
            "social_links": [{ "platform": "instagram", "url": "https://instagram.com/rinaputri" }],
        })),
    )
    .await?;
    let farhan = Author::create(
        store,
        data(json!({
            "name": "Farhan Alatas",
            "bio": rich_text("Redaktur pelaksana, fokus pada isu beasiswa dan pendidikan."),
            "email": "farhan@ppidk-timtengka.org",
            "role": "editor",
        })),
    )
    .await?;
    let nadia = Author::create(
        store,
        data(json!({
            "name": "Nadia Khairunnisa",
            "role": "columnist",
            "bio": rich_text("Kolumnis tamu, mahasiswi pascasarjana di Yordania."),
        })),
    )
    .await?;

    let berita = Category::create(
        store,
        data(json!({ "name": "Berita", "order": 1, "color": "#3B82F6" })),
    )
    .await?;
    let kegiatan = Category::create(
        store,
        data(json!({ "name": "Kegiatan", "order": 2, "color": "#10B981" })),
    )
    .await?;
    let seminar = Category::create(
        store,
        data(json!({ "name": "Seminar", "order": 3, "parent": kegiatan.id })),
    )
    .await?;
    let prestasi = Category::create(
        store,
        data(json!({ "name": "Prestasi", "order": 4, "color": "#F59E0B" })),
    )
    .await?;
    let beasiswa = Category::create(
        store,
        data(json!({ "name": "Beasiswa", "order": 5 })),
    )
    .await?;

    let sorotan = Rubric::create(
        store,
        data(json!({ "name": "Sorotan", "color": "#EF4444", "template": "standard" })),
    )
    .await?;
    let wawancara = Rubric::create(
        store,
        data(json!({ "name": "Wawancara", "color": "#8B5CF6", "template": "interview" })),
    )
    .await?;
    let opini = Rubric::create(
        store,
        data(json!({ "name": "Opini", "color": "#14B8A6", "template": "opinion" })),
    )
    .await?;

    let tag_kairo = Tag::create(store, data(json!({ "name": "Kairo" }))).await?;
    let tag_amman = Tag::create(store, data(json!({ "name": "Amman" }))).await?;
    let tag_lpdp = Tag::create(store, data(json!({ "name": "LPDP" }))).await?;

    let articles = [
        json!({
            "title": "Mahasiswa Hebat! 2024",
            "excerpt": "Delegasi PPIDK Timtengka meraih tiga penghargaan pada forum pelajar internasional.",
            "content": rich_text(
                "Forum pelajar internasional tahun ini mempertemukan delegasi dari dua belas negara. \
                 Tim PPIDK Timtengka membawa pulang tiga penghargaan sekaligus.",
            ),
            "author": rina.id,
            "categories": [berita.id, prestasi.id],
            "rubric": sorotan.id,
            "tags": [tag_kairo.id],
            "status": "published",
            "published_at": "2024-05-20T07:30:00Z",
            "is_headline": true,
            "view_count": 320,
        }),
        json!({
            "title": "Seminar Kebangsaan di Kairo",
            "excerpt": "Ratusan pelajar menghadiri seminar kebangsaan yang digelar di aula KBRI Kairo.",
            "content": rich_text(
                "Seminar kebangsaan menghadirkan tiga pembicara dari kalangan akademisi dan diaspora.",
            ),
            "author": rina.id,
            "categories": [kegiatan.id, seminar.id],
            "rubric": sorotan.id,
            "tags": [tag_kairo.id],
            "status": "published",
            "published_at": "2024-05-18T09:00:00Z",
            "is_featured": true,
            "view_count": 180,
        }),
        json!({
            "title": "Panduan Beasiswa LPDP Kawasan Timur Tengah",
            "excerpt": "Jadwal, syarat, dan kiat lolos seleksi beasiswa LPDP untuk kampus di kawasan Timur Tengah.",
            "content": rich_text(
                "Pendaftaran beasiswa dibuka dua gelombang. Perhatikan perbedaan persyaratan bahasa \
                 untuk kampus berbahasa Arab dan Inggris.",
            ),
            "author": farhan.id,
            "categories": [beasiswa.id],
            "tags": [tag_lpdp.id],
            "status": "published",
            "published_at": "2024-05-15T06:00:00Z",
            "is_featured": true,
            "view_count": 540,
            "seo": {
                "meta_title": "Beasiswa LPDP Timur Tengah: Panduan Lengkap",
                "meta_description": "Semua yang perlu disiapkan pelamar LPDP kawasan Timur Tengah.",
            },
        }),
        json!({
            "title": "Wawancara: Ketua Baru PPIDK Timtengka",
            "excerpt": "Perbincangan dengan ketua terpilih tentang arah organisasi satu tahun ke depan.",
            "content": rich_text(
                "Kami menemui ketua terpilih selepas musyawarah kawasan untuk berbincang tentang \
                 program kerja prioritas.",
            ),
            "author": rina.id,
            "categories": [berita.id],
            "rubric": wawancara.id,
            "status": "published",
            "published_at": "2024-05-12T10:00:00Z",
            "view_count": 95,
        }),
        json!({
            "title": "Catatan dari Amman: Ramadan Jauh dari Rumah",
            "excerpt": "Refleksi menjalani Ramadan sebagai mahasiswa rantau di Yordania.",
            "content": rich_text(
                "Ramadan di rantau selalu punya rasa yang berbeda. Dari dapur asrama sampai masjid \
                 kampus, semuanya menjadi keluarga.",
            ),
            "author": nadia.id,
            "categories": [kegiatan.id],
            "rubric": opini.id,
            "tags": [tag_amman.id],
            "status": "published",
            "published_at": "2024-05-08T05:45:00Z",
            "view_count": 67,
        }),
        json!({
            "title": "Rakor Kawasan 2024 Segera Digelar",
            "excerpt": "Rapat koordinasi kawasan akan mempertemukan pengurus dari tujuh negara.",
            "content": rich_text("Draf agenda rakor masih disusun oleh panitia pengarah."),
            "author": farhan.id,
            "categories": [berita.id],
            "status": "draft",
        }),
        json!({
            "title": "Arsip: Laporan Kegiatan 2022",
            "excerpt": "Laporan tahunan kegiatan organisasi periode 2022.",
            "content": rich_text("Laporan lengkap tersimpan di sekretariat."),
            "author": farhan.id,
            "categories": [kegiatan.id],
            "status": "archived",
            "published_at": "2023-01-10T08:00:00Z",
        }),
    ];
    for article in articles {
        Article::create(store, data(article)).await?;
    }

    store
        .put_global(
            SiteSettings::SLUG,
            data(json!({
                "site_name": "PPIDK Timtengka",
                "site_description": "Portal berita Perhimpunan Pelajar Indonesia Dunia kawasan Timur Tengah dan Afrika.",
                "contact_email": "redaksi@ppidk-timtengka.org",
                "social_links": [
                    { "platform": "instagram", "url": "https://instagram.com/ppidktimtengka" },
                    { "platform": "youtube", "url": "https://youtube.com/@ppidktimtengka" },
                ],
                "default_meta_title": "PPIDK Timtengka",
                "default_meta_description": "Kabar pelajar Indonesia di Timur Tengah dan Afrika.",
            })),
        )
        .await?;
    store
        .put_global(
            Navigation::SLUG,
            data(json!({
                "header_menu": [
                    { "label": "Beranda", "type": "internal", "url": "/" },
                    { "label": "Artikel", "type": "internal", "url": "/artikel" },
                    { "label": "Berita", "type": "category", "category": berita.id },
                    {
                        "label": "Kegiatan",
                        "type": "category",
                        "category": kegiatan.id,
                        "children": [{ "label": "Seminar", "category": seminar.id }],
                    },
                    { "label": "Sorotan", "type": "rubric", "rubric": sorotan.id },
                ],
                "footer_menu": [
                    {
                        "group_label": "Organisasi",
                        "links": [
                            { "label": "Tentang Kami", "url": "/tentang" },
                            { "label": "Kontak", "url": "/kontak" },
                        ],
                    },
                ],
                "footer_text": rich_text("Dikelola oleh Departemen Media dan Informasi PPIDK Timtengka."),
            })),
        )
        .await?;
    Ok(())
}

/// Wraps plain text in the rich-text document shape the editor produces.
fn rich_text(text: &str) -> JsonValue {
    json!({
        "root": {
            "type": "root",
            "children": [{
                "type": "paragraph",
                "children": [{ "type": "text", "text": text }],
            }],
        },
    })
}

fn data(value: JsonValue) -> Map {
    match value {
        JsonValue::Object(map) => map,
        _ => Map::new(),
    }
}
